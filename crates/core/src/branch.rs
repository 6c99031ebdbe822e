//! Static branch registry: which generator runs where, and how deep each branch goes.

use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BranchId {
    Main,
    Mines,
}

impl BranchId {
    pub const ALL: [BranchId; 2] = [BranchId::Main, BranchId::Mines];

    pub fn as_str(self) -> &'static str {
        match self {
            BranchId::Main => "main",
            BranchId::Mines => "mines",
        }
    }
}

impl FromStr for BranchId {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        BranchId::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| ConfigError::UnknownBranch(raw.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratorKind {
    Bsp,
    Caves,
}

/// A side entrance into another branch, placed on some floors of this one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SideEntrance {
    pub target: BranchId,
    pub target_floor: u32,
    pub eligible_floors: &'static [u32],
    pub chance: f64,
}

impl SideEntrance {
    pub fn is_eligible(&self, floor: u32) -> bool {
        self.eligible_floors.contains(&floor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BranchDef {
    pub id: BranchId,
    pub name: &'static str,
    pub generator: GeneratorKind,
    pub floors: u32,
    pub tile_width: usize,
    pub tile_height: usize,
    pub side_entrance: Option<SideEntrance>,
}

pub const BRANCHES: [BranchDef; 2] = [
    BranchDef {
        id: BranchId::Main,
        name: "Main Dungeon",
        generator: GeneratorKind::Bsp,
        floors: 20,
        tile_width: 50,
        tile_height: 40,
        side_entrance: Some(SideEntrance {
            target: BranchId::Mines,
            target_floor: 1,
            eligible_floors: &[2, 3, 4, 5],
            chance: 0.4,
        }),
    },
    BranchDef {
        id: BranchId::Mines,
        name: "Gnomish Mines",
        generator: GeneratorKind::Caves,
        floors: 8,
        tile_width: 60,
        tile_height: 50,
        side_entrance: None,
    },
];

pub fn branch_def(id: BranchId) -> &'static BranchDef {
    match BRANCHES.iter().find(|def| def.id == id) {
        Some(def) => def,
        None => panic!("branch {id:?} has no definition in the branch table"),
    }
}

/// Looks up a branch by its string id. Unknown ids are a programming error.
pub fn get_branch_def(id: &str) -> &'static BranchDef {
    match id.parse::<BranchId>() {
        Ok(branch) => branch_def(branch),
        Err(error) => panic!("{error}"),
    }
}

pub fn validate_branch_table(table: &[BranchDef]) -> Result<(), ConfigError> {
    for id in BranchId::ALL {
        match table.iter().filter(|def| def.id == id).count() {
            0 => return Err(ConfigError::MissingBranch(id)),
            1 => {}
            _ => return Err(ConfigError::DuplicateBranch(id)),
        }
    }
    Ok(())
}
