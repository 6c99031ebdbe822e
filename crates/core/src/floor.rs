//! A generated floor while it is live or parked in the cache.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::branch::BranchId;
use crate::grid::TileGrid;
use crate::mapgen::{MapGeneratorResult, StairsPlacement, TrapList};
use crate::types::{Pos, TileKind, TrapKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FloorKey {
    pub branch: BranchId,
    pub floor: u32,
}

impl FloorKey {
    pub fn new(branch: BranchId, floor: u32) -> Self {
        Self { branch, floor }
    }
}

/// Sole owner of one floor's tiles and traps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Floor {
    key: FloorKey,
    layout: MapGeneratorResult,
}

pub type FloorCache = BTreeMap<FloorKey, Floor>;

impl Floor {
    pub fn new(key: FloorKey, layout: MapGeneratorResult) -> Self {
        Self { key, layout }
    }

    pub fn key(&self) -> FloorKey {
        self.key
    }

    pub fn layout(&self) -> &MapGeneratorResult {
        &self.layout
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.layout.tiles
    }

    /// Mutable tiles for the field-of-view layer.
    pub fn tiles_mut(&mut self) -> &mut TileGrid {
        &mut self.layout.tiles
    }

    pub fn traps(&self) -> &TrapList {
        &self.layout.traps
    }

    /// Springs the trap on `pos`, if any. Each trap fires once.
    pub fn enter_tile(&mut self, pos: Pos) -> Option<TrapKind> {
        let index = self.layout.traps.index_at(pos)?;
        if !self.layout.traps.trigger(index) {
            return None;
        }
        self.layout.traps.get(index).map(|trap| trap.kind())
    }

    pub fn reveal_trap(&mut self, index: usize) -> bool {
        self.layout.traps.reveal(index)
    }

    pub fn stairs_at(&self, pos: Pos) -> Option<&StairsPlacement> {
        self.layout.stairs.iter().find(|stairs| stairs.tile == pos)
    }

    pub fn tile_of_kind(&self, kind: TileKind) -> Option<Pos> {
        self.layout.tiles.find_kind(kind)
    }

    /// Marks where the player arrived from above, unless that tile already leads down.
    pub(crate) fn stamp_arrival(&mut self, pos: Pos) {
        if self.layout.tiles.kind_at(pos) != TileKind::StairsDown {
            self.layout.tiles.set_kind(pos, TileKind::StairsUp);
        }
    }
}
