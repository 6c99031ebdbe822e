//! Configuration errors. Degenerate geometry is never an error; generators recover from it.

use thiserror::Error;

use crate::branch::BranchId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
    #[error("branch {0:?} is defined more than once")]
    DuplicateBranch(BranchId),
    #[error("branch {0:?} has no definition")]
    MissingBranch(BranchId),
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    GridTooSmall { width: usize, height: usize, min: usize },
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}
