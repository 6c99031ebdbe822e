use std::collections::{BTreeSet, VecDeque};

use dungeon_core::{
    BranchId, DungeonProgress, FlowField, MapGeneratorResult, Pos, StairsKind, TileGrid, TileKind,
    generate_floor,
};
use proptest::{
    arbitrary::any,
    collection::vec,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn reachable(tiles: &TileGrid, start: Pos) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for neighbor in current.cardinal_neighbors() {
            if tiles.is_walkable(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    visited
}

fn check_stairs_and_traps(layout: &MapGeneratorResult, context: &str) -> Result<(), String> {
    let down = layout.stairs.iter().filter(|stairs| stairs.kind == StairsKind::Down).count();
    if down != 1 {
        return Err(format!("Invariant failed: {down} down staircases on {context}"));
    }
    if layout.stairs.len() - down > 1 {
        return Err(format!("Invariant failed: more than one branch staircase on {context}"));
    }
    for stairs in &layout.stairs {
        if layout.tiles.kind_at(stairs.tile) != TileKind::StairsDown {
            return Err(format!("Invariant failed: stairs {:?} not stamped on {context}", stairs.tile));
        }
    }
    for trap in layout.traps.iter() {
        if layout.tiles.kind_at(trap.pos()) != TileKind::Floor {
            return Err(format!("Invariant failed: trap off the floor at {:?} on {context}", trap.pos()));
        }
        if layout.start_room.contains(trap.pos()) || trap.is_triggered() || trap.is_revealed() {
            return Err(format!("Invariant failed: bad trap {:?} on {context}", trap.pos()));
        }
    }
    Ok(())
}

fn check_bsp_floor(seed: u64, floor: u32) -> Result<(), String> {
    let layout = generate_floor(seed, BranchId::Main, floor);
    let context = format!("main floor {floor} seed {seed}");
    check_stairs_and_traps(&layout, &context)?;
    if !layout.rooms.contains(&layout.start_room) {
        return Err(format!("Invariant failed: start room is not a generated room on {context}"));
    }
    // A one-room floor puts its stairs on the start room center.
    if layout.rooms.len() > 1 && layout.tiles.kind_at(layout.start_room.center()) != TileKind::Floor {
        return Err(format!("Invariant failed: start room center is not floor on {context}"));
    }

    let reached = reachable(&layout.tiles, layout.start_room.center());
    for room in &layout.rooms {
        if !room.positions().all(|pos| reached.contains(&pos)) {
            return Err(format!("Invariant failed: room {room:?} unreachable on {context}"));
        }
    }
    for trap in layout.traps.iter() {
        let (x, y) = (trap.pos().x as usize, trap.pos().y as usize);
        let inside = layout
            .rooms
            .iter()
            .any(|room| x > room.x && x < room.right() && y > room.y && y < room.bottom());
        if !inside {
            return Err(format!("Invariant failed: trap outside room interiors on {context}"));
        }
    }
    Ok(())
}

fn check_cave_floor(seed: u64, floor: u32) -> Result<(), String> {
    let layout = generate_floor(seed, BranchId::Mines, floor);
    let context = format!("mines floor {floor} seed {seed}");
    check_stairs_and_traps(&layout, &context)?;

    let open = layout.tiles.positions().filter(|&pos| layout.tiles.is_walkable(pos)).count();
    let reached = reachable(&layout.tiles, layout.start_tile);
    if reached.len() != open {
        return Err(format!("Invariant failed: {} of {open} open tiles connected on {context}", reached.len()));
    }

    let stairs = layout.stairs[0].tile;
    let farthest = reached.iter().map(|pos| pos.manhattan(layout.start_tile)).max().unwrap_or(0);
    if farthest >= 15 && stairs.manhattan(layout.start_tile) < 15 {
        return Err(format!("Invariant failed: stairs too close to the spawn on {context}"));
    }
    Ok(())
}

fn check_flow_field(seed: u64, branch: BranchId) -> Result<(), String> {
    let layout = generate_floor(seed, branch, 1);
    let tiles = &layout.tiles;
    let field = FlowField::compute(tiles, layout.start_tile);
    let reached = reachable(tiles, layout.start_tile);
    let limit = tiles.width() * tiles.height();

    for pos in tiles.positions() {
        let pointer = field.next_step(pos);
        if pos == layout.start_tile || !reached.contains(&pos) {
            if pointer.is_some() {
                return Err(format!("Invariant failed: {pos:?} should hold position (seed {seed})"));
            }
            continue;
        }
        let mut current = pos;
        let mut steps = 0;
        while let Some(next) = field.next_step(current) {
            current = next;
            steps += 1;
            if steps > limit {
                return Err(format!("Invariant failed: flow cycle from {pos:?} (seed {seed})"));
            }
        }
        if current != layout.start_tile {
            return Err(format!("Invariant failed: flow from {pos:?} ends at {current:?} (seed {seed})"));
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_bsp_floors() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    runner
        .run(&(any::<u64>(), 1_u32..=20), |(seed, floor)| {
            check_bsp_floor(seed, floor).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("bsp floors should preserve invariants");
}

#[test]
fn test_fuzz_cave_floors() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    runner
        .run(&(any::<u64>(), 1_u32..=8), |(seed, floor)| {
            check_cave_floor(seed, floor).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("cave floors should preserve invariants");
}

#[test]
fn test_fuzz_flow_fields() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(12));
    runner
        .run(&any::<u64>(), |seed| {
            for branch in BranchId::ALL {
                check_flow_field(seed, branch).map_err(TestCaseError::fail)?;
            }
            Ok(())
        })
        .expect("flow fields should be acyclic");
}

#[test]
fn test_fuzz_branch_stack_round_trips() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let plan = (vec(any::<bool>(), 0..12), 1_u32..=8);
    runner
        .run(&plan, |(descents, mines_floor)| {
            let mut progress = DungeonProgress::new();
            for descend in descents {
                if descend {
                    progress.advance_floor();
                }
            }
            let before = progress.clone();
            progress.enter_branch(BranchId::Mines, mines_floor);
            if progress.return_depth() != 1 || progress.floor != mines_floor {
                return Err(TestCaseError::fail("enter_branch did not switch"));
            }
            if !progress.leave_branch() || progress != before {
                return Err(TestCaseError::fail("leave_branch did not restore the entry point"));
            }
            Ok(())
        })
        .expect("enter then leave should be the identity");
}
