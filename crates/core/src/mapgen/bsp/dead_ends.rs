//! Dead-end corridor spurs. A spur never touches existing floor or corridor except
//! where it leaves its parent tile, so it cannot create a loop or shortcut.

use rand_chacha::ChaCha8Rng;

use crate::grid::TileGrid;
use crate::mapgen::seed::{roll_chance, roll_index, roll_range, shuffle};
use crate::mapgen::tuning::BspTuning;
use crate::types::{Pos, TileKind};

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns the number of spurs carved.
pub(super) fn add_dead_ends(tiles: &mut TileGrid, tuning: &BspTuning, rng: &mut ChaCha8Rng) -> usize {
    let mut corridors: Vec<Pos> = tiles
        .positions()
        .filter(|&pos| is_interior(tiles, pos) && tiles.kind_at(pos) == TileKind::Corridor)
        .collect();
    shuffle(rng, &mut corridors);

    let mut placed = 0;
    for origin in corridors {
        if placed >= tuning.max_dead_ends {
            break;
        }
        if !roll_chance(rng, tuning.dead_end_chance) {
            continue;
        }

        let (dx, dy) = DIRECTIONS[roll_index(rng, DIRECTIONS.len())];
        let length = roll_range(rng, tuning.dead_end_min, tuning.dead_end_max);
        if !spur_is_clear(tiles, origin, (dx, dy), length) {
            continue;
        }
        for step in 1..=length as i32 {
            tiles.set_kind(origin.offset(dx * step, dy * step), TileKind::Corridor);
        }
        placed += 1;
    }
    placed
}

fn spur_is_clear(tiles: &TileGrid, origin: Pos, (dx, dy): (i32, i32), length: usize) -> bool {
    (1..=length as i32).all(|step| {
        let cell = origin.offset(dx * step, dy * step);
        if !is_interior(tiles, cell) || tiles.kind_at(cell) != TileKind::Wall {
            return false;
        }
        let behind = cell.offset(-dx, -dy);
        cell.cardinal_neighbors()
            .into_iter()
            .filter(|&neighbor| neighbor != behind && tiles.in_bounds(neighbor))
            .all(|neighbor| {
                !matches!(tiles.kind_at(neighbor), TileKind::Floor | TileKind::Corridor)
            })
    })
}

fn is_interior(tiles: &TileGrid, pos: Pos) -> bool {
    pos.x > 0
        && pos.y > 0
        && (pos.x as usize) < tiles.width() - 1
        && (pos.y as usize) < tiles.height() - 1
}
