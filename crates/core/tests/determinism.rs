use dungeon_core::{BranchId, Dungeon, MapGenerator, Pos, StairsKind, Transition, generate_floor};
use xxhash_rust::xxh3::xxh3_64;

#[test]
fn test_determinism_identical_seeds_produce_same_fingerprint() {
    for branch in BranchId::ALL {
        for floor in 1..=4 {
            let first = generate_floor(12_345, branch, floor);
            let second = generate_floor(12_345, branch, floor);
            assert_eq!(
                xxh3_64(&first.canonical_bytes()),
                xxh3_64(&second.canonical_bytes()),
                "identical inputs must produce identical floors ({branch:?} floor {floor})"
            );
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_determinism_different_seeds_produce_different_fingerprints() {
    for branch in BranchId::ALL {
        let first = generate_floor(123, branch, 1);
        let second = generate_floor(456, branch, 1);
        assert_ne!(first.fingerprint(), second.fingerprint(), "{branch:?}");
    }
}

#[test]
fn test_generation_is_independent_of_call_order() {
    let generator = MapGenerator::new(2_024);
    let forward: Vec<u64> =
        (1..=5).map(|floor| generator.generate(BranchId::Main, floor).fingerprint()).collect();
    let mut backward: Vec<u64> =
        (1..=5).rev().map(|floor| generator.generate(BranchId::Main, floor).fingerprint()).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_visibility_flags_do_not_affect_fingerprint() {
    let mut floor = generate_floor(77, BranchId::Mines, 2);
    let before = floor.fingerprint();
    floor.tiles.set_visible(Pos::new(3, 3));
    floor.tiles.set_visible(floor.start_tile);
    assert_eq!(floor.fingerprint(), before);
}

#[test]
fn test_identical_walks_visit_identical_floors() {
    fn walk(seed: u64) -> Vec<u64> {
        let mut dungeon = Dungeon::new(seed);
        let mut trace = vec![dungeon.active().layout().fingerprint()];
        for _ in 0..12 {
            let stairs = &dungeon.active().layout().stairs;
            let index = stairs
                .iter()
                .position(|stairs| matches!(stairs.kind, StairsKind::Branch { .. }))
                .unwrap_or(0);
            match dungeon.descend(index) {
                Transition::Moved { .. } => trace.push(dungeon.active().layout().fingerprint()),
                Transition::Blocked => break,
            }
        }
        trace
    }

    assert_eq!(walk(9_001), walk(9_001));
    assert_eq!(walk(9_001).len(), 13);
}
