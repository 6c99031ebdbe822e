use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand, ValueEnum};
use dungeon_core::{BranchId, Dungeon, MapGenerator, StairsKind, Transition, branch_def};
use tools::{ascii, logging, tuning_file};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one floor and print it
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Branch id, e.g. `main` or `mines`
        #[arg(short, long, default_value = "main")]
        branch: String,
        #[arg(short, long, default_value_t = 1)]
        floor: u32,
        /// TOML file with tuning overrides
        #[arg(short, long)]
        tuning: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Ascii)]
        format: Format,
    },
    /// Descend through the dungeon, taking branch stairs whenever a floor has them
    Walk {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 30)]
        steps: u32,
        #[arg(short, long)]
        tuning: Option<PathBuf>,
    },
    /// Print the default tuning as TOML
    Tuning,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

fn main() -> Result<()> {
    logging::init("warn");
    let args = Args::parse();

    match args.command {
        Command::Generate { seed, branch, floor, tuning, format } => {
            generate(seed, &branch, floor, tuning, format)
        }
        Command::Walk { seed, steps, tuning } => walk(seed, steps, tuning),
        Command::Tuning => {
            print!("{}", tuning_file::default_toml()?);
            Ok(())
        }
    }
}

fn generate(seed: u64, branch: &str, floor: u32, tuning: Option<PathBuf>, format: Format) -> Result<()> {
    let branch: BranchId = branch.parse().with_context(|| format!("Invalid --branch value: {branch}"))?;
    let floors = branch_def(branch).floors;
    ensure!(
        (1..=floors).contains(&floor),
        "--floor must be within 1..={floors} for branch {}",
        branch.as_str()
    );
    let tuning = tuning_file::load_or_default(tuning.as_deref())?;
    info!(seed, branch = branch.as_str(), floor, "generating floor");
    let layout = MapGenerator::with_tuning(seed, tuning)?.generate(branch, floor);

    match format {
        Format::Ascii => {
            let name = branch_def(branch).name;
            println!("{name} floor {floor} (seed {seed}, fingerprint {:016x})", layout.fingerprint());
            print!("{}", ascii::render(&layout));
            println!(
                "rooms: {}  stairs: {}  traps: {}",
                layout.rooms.len(),
                layout.stairs.len(),
                layout.traps.len()
            );
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&layout).context("Failed to serialize floor")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn walk(seed: u64, steps: u32, tuning: Option<PathBuf>) -> Result<()> {
    let tuning = tuning_file::load_or_default(tuning.as_deref())?;
    let mut dungeon = Dungeon::with_tuning(seed, tuning)?;
    info!(seed, steps, "walking the dungeon");
    println!("start: main 1 at {:?}", dungeon.player_spawn());

    for step in 1..=steps {
        let stairs = &dungeon.active().layout().stairs;
        let index = stairs
            .iter()
            .position(|stairs| matches!(stairs.kind, StairsKind::Branch { .. }))
            .or_else(|| stairs.iter().position(|stairs| stairs.kind == StairsKind::Down))
            .context("Active floor has no stairs")?;

        match dungeon.descend(index) {
            Transition::Moved { to, spawn, generated, .. } => {
                let origin = if generated { "new" } else { "cached" };
                println!("{step:>3}: {} {} ({origin}) at {spawn:?}", to.branch.as_str(), to.floor);
            }
            Transition::Blocked => {
                println!("{step:>3}: reached the bottom of the dungeon");
                break;
            }
        }
    }
    println!("floors visited: {}", dungeon.cache().len() + 1);
    Ok(())
}
