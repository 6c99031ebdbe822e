//! Which branch and floor the player is on, and where to return when leaving a branch.
//! This module exists so floor bookkeeping stays independent of any generated map.
//! It does not own floor storage or spawn placement.

use serde::Serialize;

use crate::branch::{BranchId, branch_def};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReturnPoint {
    pub branch: BranchId,
    pub floor: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DungeonProgress {
    pub branch: BranchId,
    /// 1-based floor within `branch`.
    pub floor: u32,
    pub return_stack: Vec<ReturnPoint>,
}

impl Default for DungeonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DungeonProgress {
    pub fn new() -> Self {
        Self { branch: BranchId::Main, floor: 1, return_stack: Vec::new() }
    }

    pub fn advance_floor(&mut self) {
        self.floor += 1;
    }

    /// Steps one floor up within the current branch. Floor 1 is the top.
    pub fn retreat_floor(&mut self) -> bool {
        if self.floor <= 1 {
            return false;
        }
        self.floor -= 1;
        true
    }

    pub fn enter_branch(&mut self, target: BranchId, target_floor: u32) {
        self.return_stack.push(ReturnPoint { branch: self.branch, floor: self.floor });
        self.branch = target;
        self.floor = target_floor;
    }

    /// Restores the most recent return point. Returns false with no change when
    /// the player is already in the outermost branch.
    pub fn leave_branch(&mut self) -> bool {
        let Some(point) = self.return_stack.pop() else {
            return false;
        };
        self.branch = point.branch;
        self.floor = point.floor;
        true
    }

    pub fn return_depth(&self) -> usize {
        self.return_stack.len()
    }

    pub fn position(&self) -> ReturnPoint {
        ReturnPoint { branch: self.branch, floor: self.floor }
    }

    /// Resolves a floor past the bottom of a sub-branch by returning to the parent
    /// one floor below the entrance, repeatedly if needed. Returns false when the
    /// floor is past the bottom of the outermost branch.
    pub fn settle_overflow(&mut self) -> bool {
        while self.floor > branch_def(self.branch).floors {
            if !self.leave_branch() {
                return false;
            }
            self.advance_floor();
        }
        true
    }
}
