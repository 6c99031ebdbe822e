use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{Dungeon, FloorKey, GenerationTuning, Transition, branch_def};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{checks, logging};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of floor transitions to attempt per run
    #[arg(short, long, default_value_t = 200)]
    floors: u32,
    /// Independent runs, seeded `seed`, `seed + 1`, ...
    #[arg(short, long, default_value_t = 8)]
    runs: u64,
}

fn main() -> Result<()> {
    logging::init("warn");
    let args = Args::parse();

    println!("Fuzzing {} runs from seed {} with {} transitions each...", args.runs, args.seed, args.floors);
    let mut checked = 0;
    for run in 0..args.runs {
        let run_seed = args.seed.wrapping_add(run);
        checked += fuzz_run(run_seed, args.floors).with_context(|| format!("run seed {run_seed}"))?;
    }
    println!("Fuzzing completed successfully: {checked} floors checked.");
    Ok(())
}

/// Random walk over stairs in both directions. Every newly generated floor is checked.
fn fuzz_run(run_seed: u64, transitions: u32) -> Result<usize> {
    let mut dungeon = Dungeon::new(run_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(run_seed);
    check_active(&dungeon)?;
    let mut checked = 1;

    for _ in 0..transitions {
        let before = dungeon.active().key();
        // Bias toward going down so runs reach the deep floors.
        let transition = if rng.next_u64() % 4 == 0 {
            dungeon.ascend()
        } else {
            let stairs = dungeon.active().layout().stairs.len();
            dungeon.descend(rng.next_u64() as usize % stairs)
        };

        match transition {
            Transition::Moved { from, to, generated, spawn } => {
                if from != before || to != dungeon.active().key() || spawn != dungeon.player_spawn() {
                    bail!("transition {from:?} -> {to:?} does not match dungeon state");
                }
                if !dungeon.active().tiles().is_walkable(spawn) {
                    bail!("spawn {spawn:?} on {to:?} is not walkable");
                }
                if generated {
                    check_active(&dungeon)?;
                    checked += 1;
                }
            }
            Transition::Blocked => {
                if dungeon.active().key() != before {
                    bail!("blocked transition changed the active floor");
                }
            }
        }
        check_progress(&dungeon)?;
    }
    Ok(checked)
}

fn check_active(dungeon: &Dungeon) -> Result<()> {
    let floor = dungeon.active();
    let key = floor.key();
    let generator = branch_def(key.branch).generator;
    // The arrival stamp turns the spawn tile into up stairs, which stays walkable.
    checks::check_floor(floor.layout(), generator, &GenerationTuning::default())
        .with_context(|| format!("{} floor {}", key.branch.as_str(), key.floor))
}

fn check_progress(dungeon: &Dungeon) -> Result<()> {
    let progress = dungeon.progress();
    let active = FloorKey::new(progress.branch, progress.floor);
    if active != dungeon.active().key() {
        bail!("progress says {active:?} but {:?} is active", dungeon.active().key());
    }
    if progress.floor == 0 || progress.floor > branch_def(progress.branch).floors {
        bail!("floor {} is outside branch {}", progress.floor, progress.branch.as_str());
    }
    if progress.return_depth() > 1 {
        bail!("return stack is {} deep but no sub-branch has its own entrance", progress.return_depth());
    }
    if dungeon.cache().contains_key(&active) {
        bail!("active floor {active:?} is also cached");
    }
    Ok(())
}
