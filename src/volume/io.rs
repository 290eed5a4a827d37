//! JSON voxel-set files.
//!
//! The external voxelizer hands over the bounding domain and the list of
//! occupied integer points:
//!
//! ```json
//! { "lower": [-5, -5, -5], "upper": [5, 5, 5], "points": [[0, 0, 0], [1, 0, 0]] }
//! ```
use super::{Domain3, OccupancyGrid};
use crate::image::io::write_json_file;
use crate::types::GridPoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoxelSet {
    pub lower: [i32; 3],
    pub upper: [i32; 3],
    #[serde(default)]
    pub points: Vec<[i32; 3]>,
}

impl VoxelSet {
    pub fn from_grid(grid: &OccupancyGrid) -> Self {
        let d = grid.domain();
        Self {
            lower: d.lower().coords.into(),
            upper: d.upper().coords.into(),
            points: grid.occupied_points().map(|p| p.coords.into()).collect(),
        }
    }

    pub fn into_grid(self) -> Result<OccupancyGrid, String> {
        let domain = Domain3::new(GridPoint::from(self.lower), GridPoint::from(self.upper))
            .map_err(|e| e.to_string())?;
        OccupancyGrid::from_points(domain, self.points.into_iter().map(GridPoint::from))
            .map_err(|e| e.to_string())
    }
}

/// Load a voxel-set JSON file into an occupancy grid.
pub fn load_voxel_set(path: &Path) -> Result<OccupancyGrid, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read voxel set {}: {e}", path.display()))?;
    let set: VoxelSet = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse voxel set {}: {e}", path.display()))?;
    set.into_grid()
        .map_err(|e| format!("Invalid voxel set {}: {e}", path.display()))
}

/// Write the occupied voxels of `grid` as a voxel-set JSON file.
pub fn write_voxel_set(path: &Path, grid: &OccupancyGrid) -> Result<(), String> {
    write_json_file(path, &VoxelSet::from_grid(grid))
}
