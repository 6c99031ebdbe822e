//! Deterministic seed mixing and the random draws every generator shares.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::branch::BranchId;

/// Seeds the generator for one `(branch, floor)` of a run.
pub fn floor_rng(run_seed: u64, branch: BranchId, floor: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_floor_seed(run_seed, branch, floor))
}

pub(crate) fn derive_floor_seed(run_seed: u64, branch: BranchId, floor: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(floor).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= branch_code(branch).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

fn branch_code(branch: BranchId) -> u64 {
    match branch {
        BranchId::Main => 1,
        BranchId::Mines => 2,
    }
}

/// Uniform draw in `min_value..=max_value`.
pub(crate) fn roll_range(rng: &mut ChaCha8Rng, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value) as u64 + 1;
    min_value + (rng.next_u64() % range_size) as usize
}

/// Uniform index into a non-empty collection of `len` items.
pub(crate) fn roll_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    roll_range(rng, 0, len.saturating_sub(1))
}

pub(crate) fn roll_chance(rng: &mut ChaCha8Rng, probability: f64) -> bool {
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    unit < probability
}

pub(crate) fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = roll_range(rng, 0, i);
        items.swap(i, j);
    }
}
