//! Voxel occupancy volumes.
//!
//! - [`Domain3`]: inclusive integer box `[lower, upper]` with x-fastest
//!   linear indexing.
//! - [`OccupancyGrid`]: dense `u32` values over a domain; a voxel is occupied
//!   iff its value is non-zero. Queries outside the domain read as empty.
//! - [`io`]: JSON voxel-set files produced by an external voxelizer.

pub mod domain;
pub mod io;
pub mod occupancy;

pub use domain::Domain3;
pub use occupancy::OccupancyGrid;
