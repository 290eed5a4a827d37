//! Directional profile (silhouette) scans.
//!
//! A scan sweeps a sampling plane through the volume along `normal`. The plane
//! starts `scan_budget` units behind the domain centre, advances one unit per
//! step, and every still-background pixel whose embedded voxel is occupied is
//! marked as a hit. Once the first hit occurred, the scan continues for
//! `scan_budget` more steps and stops. A pixel, once hit, is never examined
//! again, so the raster grows monotonically and records occupancy, not depth.
//!
//! Every scan is bounded by a step ceiling; a plane that crosses the whole
//! domain without contact yields [`ProfileError::NoSurfaceFound`].
//!
//! [`ProfileError::NoSurfaceFound`]: crate::error::ProfileError::NoSurfaceFound

mod params;
mod scanner;

pub use params::{FrameOrientation, ScanParams};
pub use scanner::{ProfileScanner, ScanOutcome};
