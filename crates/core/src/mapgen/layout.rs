//! Room carving, corridor carving, and room selection shared by the generators.

use crate::grid::TileGrid;
use crate::types::{Pos, Rect, TileKind};

pub(super) fn carve_room(tiles: &mut TileGrid, room: Rect) {
    for pos in room.positions() {
        tiles.set_kind(pos, TileKind::Floor);
    }
}

/// Carves a horizontal run along `start.y`, then a vertical run along `end.x`.
/// Only walls become corridor, so room floors keep their boundaries.
pub(super) fn carve_corridor(tiles: &mut TileGrid, start: Pos, end: Pos) {
    let mut cursor = start;
    while cursor.x != end.x {
        carve_corridor_tile(tiles, cursor);
        cursor.x += (end.x - cursor.x).signum();
    }
    while cursor.y != end.y {
        carve_corridor_tile(tiles, cursor);
        cursor.y += (end.y - cursor.y).signum();
    }
}

fn carve_corridor_tile(tiles: &mut TileGrid, pos: Pos) {
    if tiles.kind_at(pos) == TileKind::Wall {
        tiles.set_kind(pos, TileKind::Corridor);
    }
}

/// Index of the room whose center lies farthest from `rooms[start_index]`.
/// Ties keep the earliest room; a single room is its own farthest room.
pub(super) fn farthest_room(rooms: &[Rect], start_index: usize) -> usize {
    let start = rooms[start_index];
    let mut best_index = 0;
    let mut best_distance = 0;
    for (index, room) in rooms.iter().enumerate() {
        if index == start_index {
            continue;
        }
        let distance = start.center_distance(*room);
        if distance > best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}
