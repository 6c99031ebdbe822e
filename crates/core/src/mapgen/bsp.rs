//! Room-and-corridor floors built from a binary space partition.
//!
//! Every leaf of the partition gets one room and every internal node links one
//! room from each child, so the corridor graph is a spanning tree over rooms.
//! Dead-end spurs never touch anything but their parent corridor, which keeps
//! that property intact.

mod dead_ends;
mod tree;

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::branch::branch_def;
use crate::grid::TileGrid;
use crate::types::{Rect, TileKind};

use super::generator::MapGeneratorConfig;
use super::hazards::{RoomTrapContext, place_room_traps};
use super::layout::{carve_corridor, carve_room, farthest_room};
use super::model::{MapGeneratorResult, StairsKind, StairsPlacement};
use super::seed::{roll_chance, roll_index};
use super::tuning::GenerationTuning;

use dead_ends::add_dead_ends;
use tree::BspTree;

pub fn generate_bsp(
    config: &MapGeneratorConfig,
    tuning: &GenerationTuning,
    rng: &mut ChaCha8Rng,
) -> MapGeneratorResult {
    let bsp = &tuning.bsp;
    let width = config.width();
    let height = config.height();
    let mut tiles = TileGrid::filled(width, height, TileKind::Wall);

    let mut tree = BspTree::split(width, height, bsp.min_leaf.max(1), rng);
    tree.place_rooms(bsp, rng);
    let rooms = tree.rooms();
    for room in &rooms {
        carve_room(&mut tiles, *room);
    }
    for (from, to) in tree.sibling_links() {
        carve_corridor(&mut tiles, from.center(), to.center());
    }
    let spurs = add_dead_ends(&mut tiles, bsp, rng);

    let start_index = roll_index(rng, rooms.len());
    let stairs_index = farthest_room(&rooms, start_index);
    let start_room = rooms[start_index];
    let stairs_room = rooms[stairs_index];
    if start_index == stairs_index {
        debug!(rooms = rooms.len(), "single-room floor; stairs share the start room");
    }

    tiles.set_kind(stairs_room.center(), TileKind::StairsDown);
    let mut stairs = vec![StairsPlacement {
        room: stairs_room,
        tile: stairs_room.center(),
        kind: StairsKind::Down,
    }];
    let taken = [start_index, stairs_index];
    if let Some(entrance) = place_branch_entrance(config, &mut tiles, &rooms, taken, rng) {
        stairs.push(entrance);
    }

    let traps = place_room_traps(
        &RoomTrapContext {
            tiles: &tiles,
            rooms: &rooms,
            start_index,
            floor: config.floor(),
            tuning: bsp,
        },
        rng,
    );

    debug!(
        branch = config.branch().as_str(),
        floor = config.floor(),
        rooms = rooms.len(),
        spurs,
        traps = traps.len(),
        branch_stairs = stairs.len() > 1,
        "generated bsp floor"
    );

    MapGeneratorResult {
        tiles,
        start_tile: start_room.center(),
        start_room,
        rooms,
        stairs,
        traps,
        width,
        height,
    }
}

/// Stamps a side entrance into a room that holds neither the start nor the stairs.
fn place_branch_entrance(
    config: &MapGeneratorConfig,
    tiles: &mut TileGrid,
    rooms: &[Rect],
    taken: [usize; 2],
    rng: &mut ChaCha8Rng,
) -> Option<StairsPlacement> {
    let entrance = branch_def(config.branch()).side_entrance?;
    if !entrance.is_eligible(config.floor()) || !roll_chance(rng, entrance.chance) || rooms.len() < 3 {
        return None;
    }

    let candidates: Vec<Rect> = rooms
        .iter()
        .enumerate()
        .filter(|(index, _)| !taken.contains(index))
        .map(|(_, room)| *room)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let room = candidates[roll_index(rng, candidates.len())];
    let tile = room.center();
    if tiles.kind_at(tile) != TileKind::Floor {
        return None;
    }
    tiles.set_kind(tile, TileKind::StairsDown);
    Some(StairsPlacement {
        room,
        tile,
        kind: StairsKind::Branch { target: entrance.target, floor: entrance.target_floor },
    })
}
