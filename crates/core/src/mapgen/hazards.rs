//! Trap placement rules for room-and-corridor floors and cave floors.

use rand_chacha::ChaCha8Rng;

use crate::grid::TileGrid;
use crate::types::{Pos, Rect, TileKind, TrapKind};

use super::model::{Trap, TrapList};
use super::seed::{roll_chance, roll_index, roll_range};
use super::tuning::{BspTuning, CaveTuning};

pub(super) struct RoomTrapContext<'a> {
    pub(super) tiles: &'a TileGrid,
    pub(super) rooms: &'a [Rect],
    pub(super) start_index: usize,
    pub(super) floor: u32,
    pub(super) tuning: &'a BspTuning,
}

/// At most one trap per non-start room, on an interior floor tile.
pub(super) fn place_room_traps(context: &RoomTrapContext<'_>, rng: &mut ChaCha8Rng) -> TrapList {
    let mut traps = TrapList::default();
    for (index, room) in context.rooms.iter().enumerate() {
        if index == context.start_index || !roll_chance(rng, context.tuning.trap_chance) {
            continue;
        }
        if room.w < 3 || room.h < 3 {
            continue;
        }
        let x = room.x + roll_range(rng, 1, room.w - 2);
        let y = room.y + roll_range(rng, 1, room.h - 2);
        let pos = Pos::new(x as i32, y as i32);
        if context.tiles.kind_at(pos) == TileKind::Floor {
            traps.push(Trap::armed(pos, room_trap_kind(context.floor, rng)));
        }
    }
    traps
}

/// Pits dominate shallow floors; arrows and gas take over deeper down.
fn room_trap_kind(floor: u32, rng: &mut ChaCha8Rng) -> TrapKind {
    let weights: [(TrapKind, usize); 3] = match floor {
        0..=4 => [(TrapKind::Pit, 5), (TrapKind::Arrow, 3), (TrapKind::SleepGas, 2)],
        5..=10 => [(TrapKind::Pit, 3), (TrapKind::Arrow, 4), (TrapKind::SleepGas, 3)],
        _ => [(TrapKind::Pit, 2), (TrapKind::Arrow, 4), (TrapKind::SleepGas, 4)],
    };
    let total = weights.iter().map(|(_, weight)| weight).sum();
    let mut remaining = roll_range(rng, 1, total);
    for (kind, weight) in weights {
        if remaining <= weight {
            return kind;
        }
        remaining -= weight;
    }
    TrapKind::Pit
}

pub(super) struct CavernTrapContext<'a> {
    pub(super) tiles: &'a TileGrid,
    pub(super) caverns: &'a [Rect],
    pub(super) start_cavern: usize,
    pub(super) start_room: Rect,
    pub(super) start_tile: Pos,
    pub(super) tuning: &'a CaveTuning,
}

/// Caves never get arrow traps. Each non-start cavern gets a bounded number of
/// placement attempts; tiles in the spawn area are never trapped.
pub(super) fn place_cavern_traps(context: &CavernTrapContext<'_>, rng: &mut ChaCha8Rng) -> TrapList {
    let mut traps = TrapList::default();
    for (index, cavern) in context.caverns.iter().enumerate() {
        if index == context.start_cavern || !roll_chance(rng, context.tuning.trap_chance) {
            continue;
        }
        if cavern.w == 0 || cavern.h == 0 {
            continue;
        }
        for _ in 0..context.tuning.trap_attempts {
            let x = cavern.x + roll_index(rng, cavern.w);
            let y = cavern.y + roll_index(rng, cavern.h);
            let pos = Pos::new(x as i32, y as i32);
            let accepted = context.tiles.kind_at(pos) == TileKind::Floor
                && pos != context.start_tile
                && !context.start_room.contains(pos);
            if accepted {
                let kind = if roll_chance(rng, context.tuning.pit_chance) {
                    TrapKind::Pit
                } else {
                    TrapKind::SleepGas
                };
                traps.push(Trap::armed(pos, kind));
                break;
            }
        }
    }
    traps
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn open_grid(width: usize, height: usize) -> TileGrid {
        let mut tiles = TileGrid::filled(width, height, TileKind::Wall);
        for pos in Rect::new(1, 1, width - 2, height - 2).positions() {
            tiles.set_kind(pos, TileKind::Floor);
        }
        tiles
    }

    #[test]
    fn room_traps_sit_inside_non_start_rooms() {
        let tiles = open_grid(40, 20);
        let rooms = [Rect::new(2, 2, 6, 5), Rect::new(12, 3, 5, 5), Rect::new(25, 8, 8, 6)];
        let tuning = BspTuning { trap_chance: 1.0, ..BspTuning::default() };
        let context =
            RoomTrapContext { tiles: &tiles, rooms: &rooms, start_index: 0, floor: 3, tuning: &tuning };

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let traps = place_room_traps(&context, &mut rng);
            assert_eq!(traps.len(), 2, "every non-start room rolls a trap");
            for trap in traps.iter() {
                assert!(!rooms[0].contains(trap.pos()));
                let room = rooms[1..].iter().find(|room| room.contains(trap.pos()));
                let room = room.copied().expect("trap outside every room");
                assert!(trap.pos().x as usize > room.x && (trap.pos().x as usize) < room.right());
                assert!(trap.pos().y as usize > room.y && (trap.pos().y as usize) < room.bottom());
                assert!(!trap.is_revealed() && !trap.is_triggered());
            }
        }
    }

    #[test]
    fn traps_never_land_on_stairs() {
        let mut tiles = open_grid(12, 12);
        let room = Rect::new(2, 2, 3, 3);
        // The only interior tile of a 3x3 room is its center.
        tiles.set_kind(room.center(), TileKind::StairsDown);
        let rooms = [Rect::new(7, 7, 3, 3), room];
        let tuning = BspTuning { trap_chance: 1.0, ..BspTuning::default() };
        let context =
            RoomTrapContext { tiles: &tiles, rooms: &rooms, start_index: 0, floor: 1, tuning: &tuning };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(place_room_traps(&context, &mut rng).is_empty());
    }

    #[test]
    fn shallow_floors_favor_pits() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut shallow_pits = 0;
        let mut deep_pits = 0;
        for _ in 0..2_000 {
            shallow_pits += usize::from(room_trap_kind(2, &mut rng) == TrapKind::Pit);
            deep_pits += usize::from(room_trap_kind(15, &mut rng) == TrapKind::Pit);
        }
        assert!(shallow_pits > 800 && shallow_pits < 1_200, "{shallow_pits}");
        assert!(deep_pits > 250 && deep_pits < 550, "{deep_pits}");
    }

    #[test]
    fn cavern_traps_avoid_spawn_area_and_arrows() {
        let tiles = open_grid(30, 30);
        let caverns = [Rect::new(1, 1, 10, 10), Rect::new(11, 1, 10, 10), Rect::new(1, 11, 10, 10)];
        let start_tile = Pos::new(12, 5);
        let start_room = Rect::new(9, 2, 7, 7);
        let tuning = CaveTuning { trap_chance: 1.0, ..CaveTuning::default() };
        let context = CavernTrapContext {
            tiles: &tiles,
            caverns: &caverns,
            start_cavern: 0,
            start_room,
            start_tile,
            tuning: &tuning,
        };

        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let traps = place_cavern_traps(&context, &mut rng);
            assert!(traps.len() <= 2);
            for trap in traps.iter() {
                assert_ne!(trap.kind(), TrapKind::Arrow);
                assert!(!start_room.contains(trap.pos()));
                assert!(!caverns[0].contains(trap.pos()));
                assert_eq!(tiles.kind_at(trap.pos()), TileKind::Floor);
            }
        }
    }
}
