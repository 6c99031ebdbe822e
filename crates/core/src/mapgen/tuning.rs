//! Tunable generation constants. Defaults are the tuned values; a host may load overrides.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    pub bsp: BspTuning,
    pub caves: CaveTuning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspTuning {
    /// Nodes stop splitting once both extents are below twice this.
    pub min_leaf: usize,
    pub min_room: usize,
    /// Gap kept between a room and its leaf boundary, per side.
    pub room_padding: usize,
    pub max_dead_ends: usize,
    pub dead_end_chance: f64,
    pub dead_end_min: usize,
    pub dead_end_max: usize,
    pub trap_chance: f64,
}

impl Default for BspTuning {
    fn default() -> Self {
        Self {
            min_leaf: 8,
            min_room: 4,
            room_padding: 1,
            max_dead_ends: 4,
            dead_end_chance: 0.25,
            dead_end_min: 2,
            dead_end_max: 6,
            trap_chance: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveTuning {
    pub open_chance: f64,
    pub automata_steps: usize,
    /// A cell turns to wall when at least this many of its eight neighbors are walls.
    pub wall_threshold: usize,
    pub cavern_cell: usize,
    pub min_open: usize,
    pub min_stair_separation: u32,
    pub spawn_margin: usize,
    pub trap_chance: f64,
    pub trap_attempts: usize,
    pub pit_chance: f64,
}

impl Default for CaveTuning {
    fn default() -> Self {
        Self {
            open_chance: 0.44,
            automata_steps: 5,
            wall_threshold: 5,
            cavern_cell: 10,
            min_open: 4,
            min_stair_separation: 15,
            spawn_margin: 3,
            trap_chance: 0.2,
            trap_attempts: 10,
            pit_chance: 0.6,
        }
    }
}

impl GenerationTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bsp = &self.bsp;
        let caves = &self.caves;
        check(bsp.min_leaf >= 2 * bsp.room_padding + 1, "bsp.min_leaf must leave room inside padding")?;
        check(bsp.min_room >= 1, "bsp.min_room must be at least 1")?;
        check(bsp.dead_end_min >= 1, "bsp.dead_end_min must be at least 1")?;
        check(bsp.dead_end_min <= bsp.dead_end_max, "bsp.dead_end_min exceeds bsp.dead_end_max")?;
        check(is_probability(bsp.dead_end_chance), "bsp.dead_end_chance must be within 0..=1")?;
        check(is_probability(bsp.trap_chance), "bsp.trap_chance must be within 0..=1")?;
        check(is_probability(caves.open_chance), "caves.open_chance must be within 0..=1")?;
        check(caves.wall_threshold <= 8, "caves.wall_threshold cannot exceed 8 neighbors")?;
        check(caves.cavern_cell >= 1, "caves.cavern_cell must be at least 1")?;
        check(caves.min_stair_separation >= 1, "caves.min_stair_separation must be at least 1")?;
        check(caves.trap_attempts >= 1, "caves.trap_attempts must be at least 1")?;
        check(is_probability(caves.trap_chance), "caves.trap_chance must be within 0..=1")?;
        check(is_probability(caves.pit_chance), "caves.pit_chance must be within 0..=1")?;
        Ok(())
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn check(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition { Ok(()) } else { Err(ConfigError::InvalidTuning(message.to_string())) }
}
