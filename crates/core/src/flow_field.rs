//! Single-source breadth-first flow field toward the player.
//! This module exists so every chasing entity shares one search per tick.
//! It does not own movement, collision, or when the field is rebuilt.

use std::collections::VecDeque;

use crate::grid::TileGrid;
use crate::types::{Pos, TileKind, WorldPoint};

/// Steps walked for ordinary movement.
pub const LOOK_AHEAD_STEP: usize = 1;
/// Steps walked while chasing, so movers cut corners less.
pub const LOOK_AHEAD_CHASE: usize = 3;

/// Per-tile pointer to the next tile on a shortest path to the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowField {
    width: usize,
    height: usize,
    next: Vec<Option<Pos>>,
    source: Pos,
}

impl FlowField {
    /// Neighbors are expanded north, south, west, east, so ties between equal
    /// paths always resolve the same way. Walls are impassable.
    pub fn compute(grid: &TileGrid, source: Pos) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut field = Self { width, height, next: vec![None; width * height], source };
        if !grid.in_bounds(source) {
            return field;
        }

        let mut visited = vec![false; width * height];
        visited[grid.index(source)] = true;
        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            for neighbor in current.cardinal_neighbors() {
                if !grid.in_bounds(neighbor) || grid.kind_at(neighbor) == TileKind::Wall {
                    continue;
                }
                let index = grid.index(neighbor);
                if visited[index] {
                    continue;
                }
                visited[index] = true;
                field.next[index] = Some(current);
                queue.push_back(neighbor);
            }
        }
        field
    }

    /// Uses the tile under `player_center` as the source.
    pub fn from_world(grid: &TileGrid, player_center: WorldPoint) -> Self {
        Self::compute(grid, Pos::from_world(player_center))
    }

    pub fn source(&self) -> Pos {
        self.source
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `None` for the source, walls, unreachable tiles, and positions off the grid.
    pub fn next_step(&self, pos: Pos) -> Option<Pos> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.next[pos.y as usize * self.width + pos.x as usize]
    }

    /// Follows up to `look_ahead` pointers from the entity's tile and returns the
    /// center of the tile reached. `None` means hold position.
    pub fn flow_target(&self, entity_center: WorldPoint, look_ahead: usize) -> Option<WorldPoint> {
        let mut current = Pos::from_world(entity_center);
        let mut moved = false;
        for _ in 0..look_ahead.max(1) {
            let Some(next) = self.next_step(current) else {
                break;
            };
            current = next;
            moved = true;
        }
        moved.then(|| current.world_center())
    }
}

pub fn flow_target(field: &FlowField, entity_center: WorldPoint, look_ahead: usize) -> Option<WorldPoint> {
    field.flow_target(entity_center, look_ahead)
}
