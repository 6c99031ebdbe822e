pub mod branch;
pub mod dungeon;
pub mod error;
pub mod floor;
pub mod flow_field;
pub mod grid;
pub mod mapgen;
pub mod progress;
pub mod types;

pub use branch::{BRANCHES, BranchDef, BranchId, GeneratorKind, SideEntrance, branch_def, get_branch_def};
pub use dungeon::{Dungeon, Transition};
pub use error::ConfigError;
pub use floor::{Floor, FloorCache, FloorKey};
pub use flow_field::{FlowField, LOOK_AHEAD_CHASE, LOOK_AHEAD_STEP, flow_target};
pub use grid::{Tile, TileGrid, is_walkable};
pub use mapgen::{
    GenerationTuning, MapGenerator, MapGeneratorConfig, MapGeneratorResult, StairsKind, StairsPlacement, Trap,
    TrapList, generate_floor,
};
pub use progress::{DungeonProgress, ReturnPoint};
pub use types::*;
