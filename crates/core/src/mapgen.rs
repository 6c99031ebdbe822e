//! Procedural floor generation: BSP rooms for structured branches, automata caves for the rest.

pub mod model;
pub mod seed;
pub mod tuning;

mod bsp;
mod caves;
mod generator;
mod hazards;
mod layout;

pub use bsp::generate_bsp;
pub use caves::generate_caves;
pub use generator::{MIN_GRID_DIMENSION, MapGenerator, MapGeneratorConfig, generate_with};
pub use model::{MapGeneratorResult, StairsKind, StairsPlacement, Trap, TrapList};
pub use tuning::{BspTuning, CaveTuning, GenerationTuning};

use crate::branch::BranchId;

pub fn generate_floor(run_seed: u64, branch: BranchId, floor: u32) -> MapGeneratorResult {
    MapGenerator::new(run_seed).generate(branch, floor)
}

#[cfg(test)]
mod tests {
    use super::{BranchId, MapGenerator};

    #[test]
    fn generate_floor_matches_map_generator_output() {
        let seed = 123_u64;
        let floor = 2_u32;

        let from_helper = super::generate_floor(seed, BranchId::Main, floor);
        let from_generator = MapGenerator::new(seed).generate(BranchId::Main, floor);

        assert_eq!(from_helper, from_generator);
    }
}
