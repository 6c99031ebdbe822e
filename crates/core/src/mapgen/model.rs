//! Public data models for generated floors: stairs, traps, and the generator result.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::branch::BranchId;
use crate::grid::TileGrid;
use crate::types::{Pos, Rect, TileKind, TrapKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StairsKind {
    Down,
    /// Side entrance into another branch.
    Branch { target: BranchId, floor: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StairsPlacement {
    pub room: Rect,
    pub tile: Pos,
    pub kind: StairsKind,
}

/// A trap on one tile. `revealed` and `triggered` only ever go from false to true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Trap {
    pos: Pos,
    kind: TrapKind,
    revealed: bool,
    triggered: bool,
}

impl Trap {
    pub(crate) fn armed(pos: Pos, kind: TrapKind) -> Self {
        Self { pos, kind, revealed: false, triggered: false }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn kind(&self) -> TrapKind {
        self.kind
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrapList {
    traps: Vec<Trap>,
}

impl TrapList {
    pub(crate) fn push(&mut self, trap: Trap) {
        self.traps.push(trap);
    }

    pub fn len(&self) -> usize {
        self.traps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Trap> {
        self.traps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trap> {
        self.traps.iter()
    }

    pub fn index_at(&self, pos: Pos) -> Option<usize> {
        self.traps.iter().position(|trap| trap.pos == pos)
    }

    /// Returns true if the trap was hidden before this call.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.traps.get_mut(index) {
            Some(trap) if !trap.revealed => {
                trap.revealed = true;
                true
            }
            _ => false,
        }
    }

    /// Returns true only for the first trigger; traps never re-arm.
    pub fn trigger(&mut self, index: usize) -> bool {
        match self.traps.get_mut(index) {
            Some(trap) if !trap.triggered => {
                trap.triggered = true;
                trap.revealed = true;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapGeneratorResult {
    pub tiles: TileGrid,
    pub rooms: Vec<Rect>,
    pub start_room: Rect,
    pub start_tile: Pos,
    pub stairs: Vec<StairsPlacement>,
    pub traps: TrapList,
    pub width: usize,
    pub height: usize,
}

impl MapGeneratorResult {
    pub fn down_stairs(&self) -> Option<&StairsPlacement> {
        self.stairs.iter().find(|stairs| stairs.kind == StairsKind::Down)
    }

    pub fn branch_stairs(&self) -> Option<&StairsPlacement> {
        self.stairs.iter().find(|stairs| matches!(stairs.kind, StairsKind::Branch { .. }))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for pos in self.tiles.positions() {
            bytes.push(match self.tiles.kind_at(pos) {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Corridor => 2,
                TileKind::Door => 3,
                TileKind::StairsDown => 4,
                TileKind::StairsUp => 5,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            push_rect(&mut bytes, *room);
        }
        push_rect(&mut bytes, self.start_room);
        push_pos(&mut bytes, self.start_tile);

        bytes.extend((self.stairs.len() as u32).to_le_bytes());
        for stairs in &self.stairs {
            push_pos(&mut bytes, stairs.tile);
            match stairs.kind {
                StairsKind::Down => bytes.push(0),
                StairsKind::Branch { target, floor } => {
                    bytes.push(1);
                    bytes.extend(target.as_str().as_bytes());
                    bytes.extend(floor.to_le_bytes());
                }
            }
        }

        bytes.extend((self.traps.len() as u32).to_le_bytes());
        for trap in self.traps.iter() {
            push_pos(&mut bytes, trap.pos);
            bytes.push(match trap.kind {
                TrapKind::Arrow => 0,
                TrapKind::Pit => 1,
                TrapKind::SleepGas => 2,
            });
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_rect(bytes: &mut Vec<u8>, rect: Rect) {
    for value in [rect.x, rect.y, rect.w, rect.h] {
        bytes.extend((value as u32).to_le_bytes());
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_traps() -> TrapList {
        let mut traps = TrapList::default();
        traps.push(Trap::armed(Pos::new(2, 3), TrapKind::Pit));
        traps.push(Trap::armed(Pos::new(5, 1), TrapKind::SleepGas));
        traps
    }

    #[test]
    fn trigger_fires_once_and_stays_triggered() {
        let mut traps = sample_traps();
        assert!(traps.trigger(1));
        assert!(!traps.trigger(1));
        let trap = traps.get(1).copied();
        assert!(trap.is_some_and(|t| t.is_triggered() && t.is_revealed()));
        assert!(traps.get(0).is_some_and(|t| !t.is_triggered()));
    }

    #[test]
    fn reveal_reports_first_detection_only() {
        let mut traps = sample_traps();
        assert!(traps.reveal(0));
        assert!(!traps.reveal(0));
        assert!(!traps.reveal(9));
        assert!(!traps.trigger(9));
    }

    #[test]
    fn index_at_finds_trap_by_tile() {
        let traps = sample_traps();
        assert_eq!(traps.index_at(Pos::new(5, 1)), Some(1));
        assert_eq!(traps.index_at(Pos::new(0, 0)), None);
    }
}
