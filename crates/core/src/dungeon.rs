//! Floor-change mechanics across branches, with every visited floor kept for revisits.
//! This module exists to isolate transition planning and spawn selection.
//! It does not own movement, field of view, or what happens on a floor.

use std::mem;

use serde::Serialize;
use tracing::info;

use crate::error::ConfigError;
use crate::flow_field::FlowField;
use crate::floor::{Floor, FloorCache, FloorKey};
use crate::mapgen::{GenerationTuning, MapGenerator, StairsKind};
use crate::progress::DungeonProgress;
use crate::types::{Pos, TileKind, WorldPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Transition {
    Moved { from: FloorKey, to: FloorKey, spawn: Pos, generated: bool },
    /// No floor exists in that direction; nothing changed.
    Blocked,
}

pub struct Dungeon {
    generator: MapGenerator,
    progress: DungeonProgress,
    active: Floor,
    cache: FloorCache,
    player_spawn: Pos,
}

impl Dungeon {
    pub fn new(run_seed: u64) -> Self {
        Self::start(MapGenerator::new(run_seed))
    }

    pub fn with_tuning(run_seed: u64, tuning: GenerationTuning) -> Result<Self, ConfigError> {
        Ok(Self::start(MapGenerator::with_tuning(run_seed, tuning)?))
    }

    fn start(generator: MapGenerator) -> Self {
        let progress = DungeonProgress::new();
        let key = FloorKey::new(progress.branch, progress.floor);
        let active = Floor::new(key, generator.generate(key.branch, key.floor));
        let player_spawn = active.layout().start_tile;
        Self { generator, progress, active, cache: FloorCache::new(), player_spawn }
    }

    pub fn progress(&self) -> &DungeonProgress {
        &self.progress
    }

    pub fn active(&self) -> &Floor {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Floor {
        &mut self.active
    }

    pub fn cache(&self) -> &FloorCache {
        &self.cache
    }

    pub fn player_spawn(&self) -> Pos {
        self.player_spawn
    }

    /// Takes the stairs at `stairs_index` in the active floor's stairs list.
    pub fn descend(&mut self, stairs_index: usize) -> Transition {
        let Some(stairs) = self.active.layout().stairs.get(stairs_index).copied() else {
            return Transition::Blocked;
        };
        let mut planned = self.progress.clone();
        match stairs.kind {
            StairsKind::Down => planned.advance_floor(),
            StairsKind::Branch { target, floor } => planned.enter_branch(target, floor),
        }
        if !planned.settle_overflow() {
            info!(branch = planned.branch.as_str(), "no floor below the bottom of the dungeon");
            return Transition::Blocked;
        }

        let to = FloorKey::new(planned.branch, planned.floor);
        let (mut floor, generated) = self.take_floor(to);
        let spawn = if generated {
            let start = floor.layout().start_tile;
            floor.stamp_arrival(start);
            start
        } else {
            floor.tile_of_kind(TileKind::StairsUp).unwrap_or(floor.layout().start_tile)
        };
        self.install(planned, floor, spawn, generated)
    }

    /// Climbs one floor, or out of the current branch from its first floor.
    pub fn ascend(&mut self) -> Transition {
        let mut planned = self.progress.clone();
        let leaving = planned.branch;
        let left_branch = if planned.retreat_floor() {
            false
        } else if planned.leave_branch() {
            true
        } else {
            info!("already on the top floor");
            return Transition::Blocked;
        };

        let to = FloorKey::new(planned.branch, planned.floor);
        let (floor, generated) = self.take_floor(to);
        let layout = floor.layout();
        let arrival = if left_branch {
            layout
                .stairs
                .iter()
                .find(|stairs| matches!(stairs.kind, StairsKind::Branch { target, .. } if target == leaving))
        } else {
            layout.down_stairs()
        };
        let spawn = arrival.map_or(layout.start_tile, |stairs| stairs.tile);
        self.install(planned, floor, spawn, generated)
    }

    fn take_floor(&mut self, key: FloorKey) -> (Floor, bool) {
        match self.cache.remove(&key) {
            Some(floor) => (floor, false),
            None => (Floor::new(key, self.generator.generate(key.branch, key.floor)), true),
        }
    }

    fn install(&mut self, progress: DungeonProgress, floor: Floor, spawn: Pos, generated: bool) -> Transition {
        let to = floor.key();
        let previous = mem::replace(&mut self.active, floor);
        let from = previous.key();
        self.cache.insert(from, previous);
        self.progress = progress;
        self.player_spawn = spawn;
        info!(
            from_branch = from.branch.as_str(),
            from_floor = from.floor,
            to_branch = to.branch.as_str(),
            to_floor = to.floor,
            generated,
            "floor transition"
        );
        Transition::Moved { from, to, spawn, generated }
    }

    pub fn flow_field(&self, player_center: WorldPoint) -> FlowField {
        FlowField::from_world(self.active.tiles(), player_center)
    }
}
