#![doc = include_str!("../README.md")]

// Public modules
pub mod axes;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod profile;
pub mod shapes;
pub mod types;
pub mod volume;

// Building blocks of the scanner; public for tools and tests.
pub mod embed;
pub mod geometry;

// --- High-level re-exports -------------------------------------------------

pub use crate::axes::{extract_principal_frame, PrincipalFrame};
pub use crate::error::ProfileError;
pub use crate::image::ProfileImage;
pub use crate::pipeline::{PipelineParams, ProfilePipeline, ProfileResult, ScanBudget};
pub use crate::profile::{FrameOrientation, ProfileScanner, ScanOutcome, ScanParams};
pub use crate::types::{Direction, GridPoint};
pub use crate::volume::{Domain3, OccupancyGrid};

pub use crate::diagnostics::{ProfileReport, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use voxel_profile::prelude::*;
///
/// # fn main() {
/// let grid = voxel_profile::shapes::cuboid([12, 6, 3], 0).expect("cuboid");
/// let frame = extract_principal_frame(&grid);
/// let scanner = ProfileScanner::new(ScanParams::square(64, 10));
/// let primary = frame.primary().expect("non-empty grid");
/// let padded = grid.padded(10).expect("padding");
/// let image = scanner.scan(&padded, &primary, None).expect("scan");
/// println!("hits={}", image.hit_count());
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        extract_principal_frame, Direction, GridPoint, OccupancyGrid, PipelineParams,
        ProfileImage, ProfilePipeline, ProfileScanner, ScanParams,
    };
}
