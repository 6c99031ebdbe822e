//! Generator entry points: per-floor configuration and branch dispatch.

use rand_chacha::ChaCha8Rng;

use crate::branch::{BranchId, GeneratorKind, branch_def};
use crate::error::ConfigError;

use super::bsp::generate_bsp;
use super::caves::generate_caves;
use super::model::MapGeneratorResult;
use super::seed::floor_rng;
use super::tuning::GenerationTuning;

/// Smallest grid edge that leaves a 3x3 interior inside the solid border.
pub const MIN_GRID_DIMENSION: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapGeneratorConfig {
    width: usize,
    height: usize,
    floor: u32,
    branch: BranchId,
}

impl MapGeneratorConfig {
    pub fn new(width: usize, height: usize, floor: u32, branch: BranchId) -> Result<Self, ConfigError> {
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(ConfigError::GridTooSmall { width, height, min: MIN_GRID_DIMENSION });
        }
        Ok(Self { width, height, floor, branch })
    }

    /// Dimensions come from the branch table, which only holds valid sizes.
    pub fn for_branch(branch: BranchId, floor: u32) -> Self {
        let def = branch_def(branch);
        Self { width: def.tile_width, height: def.tile_height, floor, branch }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn branch(&self) -> BranchId {
        self.branch
    }
}

pub struct MapGenerator {
    run_seed: u64,
    tuning: GenerationTuning,
}

impl MapGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed, tuning: GenerationTuning::default() }
    }

    pub fn with_tuning(run_seed: u64, tuning: GenerationTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self { run_seed, tuning })
    }

    pub fn tuning(&self) -> &GenerationTuning {
        &self.tuning
    }

    pub fn generate(&self, branch: BranchId, floor: u32) -> MapGeneratorResult {
        let config = MapGeneratorConfig::for_branch(branch, floor);
        let mut rng = floor_rng(self.run_seed, branch, floor);
        generate_with(&config, &self.tuning, &mut rng)
    }
}

/// Runs the generator the branch table assigns to `config.branch()`.
pub fn generate_with(
    config: &MapGeneratorConfig,
    tuning: &GenerationTuning,
    rng: &mut ChaCha8Rng,
) -> MapGeneratorResult {
    match branch_def(config.branch()).generator {
        GeneratorKind::Bsp => generate_bsp(config, tuning, rng),
        GeneratorKind::Caves => generate_caves(config, tuning, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    #[test]
    fn undersized_grids_are_rejected() {
        assert_eq!(
            MapGeneratorConfig::new(4, 30, 1, BranchId::Main),
            Err(ConfigError::GridTooSmall { width: 4, height: 30, min: MIN_GRID_DIMENSION })
        );
        assert!(MapGeneratorConfig::new(5, 5, 1, BranchId::Main).is_ok());
    }

    #[test]
    fn invalid_tuning_is_rejected_before_generation() {
        let mut tuning = GenerationTuning::default();
        tuning.bsp.dead_end_min = 7;
        assert!(matches!(MapGenerator::with_tuning(1, tuning), Err(ConfigError::InvalidTuning(_))));

        let generator = MapGenerator::with_tuning(1, GenerationTuning::default()).expect("default tuning is valid");
        assert_eq!(generator.generate(BranchId::Main, 1), MapGenerator::new(1).generate(BranchId::Main, 1));
    }

    #[test]
    fn branch_config_uses_table_dimensions() {
        let config = MapGeneratorConfig::for_branch(BranchId::Mines, 3);
        assert_eq!((config.width(), config.height(), config.floor()), (60, 50, 3));
    }

    #[test]
    fn same_inputs_produce_byte_identical_floor_output() {
        for branch in BranchId::ALL {
            let a = MapGenerator::new(123_456).generate(branch, 2);
            let b = MapGenerator::new(123_456).generate(branch, 2);
            assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        }
    }

    #[test]
    fn changing_floor_or_branch_changes_output() {
        let generator = MapGenerator::new(88_001);
        let main_1 = generator.generate(BranchId::Main, 1);
        let main_2 = generator.generate(BranchId::Main, 2);
        let mines_1 = generator.generate(BranchId::Mines, 1);
        assert_ne!(main_1.fingerprint(), main_2.fingerprint());
        assert_ne!(main_1.fingerprint(), mines_1.fingerprint());
    }

    #[test]
    fn dispatch_follows_the_branch_generator() {
        let generator = MapGenerator::new(9);
        let main = generator.generate(BranchId::Main, 1);
        let mines = generator.generate(BranchId::Mines, 1);
        assert!(main.tiles.count_kind(TileKind::Corridor) > 0);
        assert_eq!(mines.tiles.count_kind(TileKind::Corridor), 0);
        assert_eq!((mines.width, mines.height), (60, 50));
    }
}
