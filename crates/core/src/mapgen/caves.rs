//! Organic cave floors from a cellular automaton.
//!
//! After smoothing, only the largest 4-connected region is kept, so every open
//! tile reaches every other. Caverns are sampled on a coarse grid and stand in
//! for rooms when picking the spawn, the stairs, and trap sites.

mod automata;
mod caverns;

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::generator::MapGeneratorConfig;
use super::hazards::{CavernTrapContext, place_cavern_traps};
use super::layout::farthest_room;
use super::model::{MapGeneratorResult, StairsKind, StairsPlacement};
use super::seed::roll_index;
use super::tuning::GenerationTuning;
use crate::types::TileKind;

use automata::CaveMap;
use caverns::{best_open_tile, fallback_cavern, find_caverns, separated_stairs_tile, spawn_rect};

pub fn generate_caves(
    config: &MapGeneratorConfig,
    tuning: &GenerationTuning,
    rng: &mut ChaCha8Rng,
) -> MapGeneratorResult {
    let caves = &tuning.caves;
    let width = config.width();
    let height = config.height();

    let mut map = CaveMap::random_fill(width, height, caves.open_chance, rng);
    for _ in 0..caves.automata_steps {
        map.smooth(caves.wall_threshold);
    }
    let regions = map.keep_largest_region();
    if map.open_count() == 0 {
        debug!(width, height, "cave closed up entirely; opening a center chamber");
        map.open_center_chamber();
    }
    let mut tiles = map.to_grid();

    let mut rooms = find_caverns(&map, caves.cavern_cell, caves.min_open);
    if rooms.is_empty() {
        let fallback = fallback_cavern(&map).unwrap_or_else(|| map.interior());
        debug!(?fallback, "no cavern met the open-tile threshold");
        rooms.push(fallback);
    }

    let start_index = roll_index(rng, rooms.len());
    let stairs_index = farthest_room(&rooms, start_index);
    let start_cavern = rooms[start_index];
    let stairs_cavern = rooms[stairs_index];

    let start_tile = best_open_tile(&map, start_cavern)
        .or_else(|| best_open_tile(&map, map.interior()))
        .unwrap_or_else(|| map.interior().center());
    let start_room = spawn_rect(&map, start_tile, caves.spawn_margin);

    let candidate = best_open_tile(&map, stairs_cavern).unwrap_or(start_tile);
    let stairs_tile = separated_stairs_tile(&map, start_tile, candidate, caves.min_stair_separation);
    if stairs_tile != candidate {
        debug!(?candidate, ?stairs_tile, "stairs moved away from the spawn");
    }
    tiles.set_kind(stairs_tile, TileKind::StairsDown);
    let stairs = vec![StairsPlacement { room: stairs_cavern, tile: stairs_tile, kind: StairsKind::Down }];

    let traps = place_cavern_traps(
        &CavernTrapContext {
            tiles: &tiles,
            caverns: &rooms,
            start_cavern: start_index,
            start_room,
            start_tile,
            tuning: caves,
        },
        rng,
    );

    debug!(
        branch = config.branch().as_str(),
        floor = config.floor(),
        regions,
        open = map.open_count(),
        caverns = rooms.len(),
        separation = stairs_tile.manhattan(start_tile),
        traps = traps.len(),
        "generated cave floor"
    );

    MapGeneratorResult { tiles, rooms, start_room, start_tile, stairs, traps, width, height }
}
