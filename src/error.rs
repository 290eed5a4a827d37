//! Error type shared by the volume, embedding and scanning stages.

use crate::types::GridPoint;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("invalid domain: lower bound {lower:?} exceeds upper bound {upper:?}")]
    InvalidDomain { lower: [i32; 3], upper: [i32; 3] },

    #[error("point {0:?} lies outside the grid domain")]
    PointOutsideDomain(GridPoint),

    #[error("invalid scan parameters: {0}")]
    InvalidParams(String),

    #[error("degenerate direction: {0}")]
    DegenerateDirection(String),

    #[error("principal frame is degenerate (no occupied voxels)")]
    DegenerateFrame,

    #[error("scan plane never reached an occupied voxel within {steps} steps")]
    NoSurfaceFound { steps: usize },
}

pub type Result<T> = std::result::Result<T, ProfileError>;
