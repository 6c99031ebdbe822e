//! Structural checks on generated floors, shared by the fuzz binary and tests.

use std::collections::{BTreeSet, VecDeque};

use anyhow::{Result, bail, ensure};
use dungeon_core::{
    FlowField, GenerationTuning, GeneratorKind, MapGeneratorResult, Pos, StairsKind, TileGrid, TileKind,
};

pub fn check_floor(layout: &MapGeneratorResult, generator: GeneratorKind, tuning: &GenerationTuning) -> Result<()> {
    let tiles = &layout.tiles;
    ensure!(
        tiles.width() == layout.width && tiles.height() == layout.height,
        "grid is {}x{} but the result reports {}x{}",
        tiles.width(),
        tiles.height(),
        layout.width,
        layout.height
    );
    check_stairs(layout)?;
    check_traps(layout, generator)?;

    let reached = reachable(tiles, layout.start_tile);
    match generator {
        GeneratorKind::Bsp => {
            for room in &layout.rooms {
                if let Some(pos) = room.positions().find(|pos| !reached.contains(pos)) {
                    bail!("room {room:?} tile {pos:?} is unreachable from the start");
                }
            }
        }
        GeneratorKind::Caves => {
            let walkable = tiles.positions().filter(|&pos| tiles.is_walkable(pos)).count();
            ensure!(
                reached.len() == walkable,
                "cave has {walkable} open tiles but only {} connect to the start",
                reached.len()
            );
            check_stairs_separation(layout, &reached, tuning.caves.min_stair_separation)?;
        }
    }

    check_flow_field(tiles, layout.start_tile)
}

fn check_stairs(layout: &MapGeneratorResult) -> Result<()> {
    let down = layout.stairs.iter().filter(|stairs| stairs.kind == StairsKind::Down).count();
    let branch = layout.stairs.len() - down;
    ensure!(down == 1, "expected exactly one down staircase, found {down}");
    ensure!(branch <= 1, "expected at most one branch staircase, found {branch}");
    for stairs in &layout.stairs {
        ensure!(
            layout.tiles.kind_at(stairs.tile) == TileKind::StairsDown,
            "stairs at {:?} are not stamped on the grid",
            stairs.tile
        );
    }
    Ok(())
}

fn check_traps(layout: &MapGeneratorResult, generator: GeneratorKind) -> Result<()> {
    for trap in layout.traps.iter() {
        let pos = trap.pos();
        ensure!(layout.tiles.kind_at(pos) == TileKind::Floor, "trap at {pos:?} is not on a floor tile");
        ensure!(pos != layout.start_tile, "trap sits on the spawn tile");
        ensure!(!layout.start_room.contains(pos), "trap at {pos:?} is inside the start room");
        ensure!(!trap.is_revealed() && !trap.is_triggered(), "trap at {pos:?} was generated sprung");
        if generator == GeneratorKind::Bsp {
            let interior = layout.rooms.iter().any(|room| {
                let (x, y) = (pos.x as usize, pos.y as usize);
                x > room.x && x < room.right() && y > room.y && y < room.bottom()
            });
            ensure!(interior, "trap at {pos:?} is not inside any room interior");
        }
    }
    Ok(())
}

fn check_stairs_separation(
    layout: &MapGeneratorResult,
    reached: &BTreeSet<Pos>,
    min_separation: u32,
) -> Result<()> {
    let Some(down) = layout.down_stairs() else {
        bail!("cave floor has no down stairs");
    };
    let farthest = reached.iter().map(|pos| pos.manhattan(layout.start_tile)).max().unwrap_or(0);
    let separation = down.tile.manhattan(layout.start_tile);
    if farthest >= min_separation {
        ensure!(
            separation >= min_separation,
            "stairs are {separation} tiles from the spawn though {farthest} was possible"
        );
    }
    Ok(())
}

/// Every walkable tile must either follow its pointers to the source or have none.
pub fn check_flow_field(tiles: &TileGrid, source: Pos) -> Result<()> {
    let field = FlowField::compute(tiles, source);
    let limit = tiles.width() * tiles.height();
    for pos in tiles.positions() {
        if !tiles.is_walkable(pos) {
            ensure!(field.next_step(pos).is_none(), "wall {pos:?} has a flow pointer");
            continue;
        }
        let mut current = pos;
        let mut steps = 0;
        while let Some(next) = field.next_step(current) {
            ensure!(current.manhattan(next) == 1, "pointer from {current:?} skips to {next:?}");
            current = next;
            steps += 1;
            ensure!(steps <= limit, "flow pointers from {pos:?} form a cycle");
        }
        ensure!(
            current == source || steps == 0,
            "flow pointers from {pos:?} stop at {current:?} instead of the source"
        );
    }
    Ok(())
}

fn reachable(tiles: &TileGrid, source: Pos) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::new();
    if !tiles.is_walkable(source) {
        return visited;
    }
    visited.insert(source);
    let mut queue = VecDeque::from([source]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_neighbors() {
            if tiles.is_walkable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}
