use crate::pipeline::PipelineParams;
use crate::shapes;
use crate::volume::io::load_voxel_set;
use crate::volume::OccupancyGrid;
use nalgebra::Rotation3;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ProfileDemoConfig {
    pub input: InputSource,
    #[serde(default)]
    pub pipeline: PipelineParams,
    pub output: ProfileDemoOutputConfig,
}

/// Where the occupancy grid comes from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Voxel-set JSON file produced by the voxelizer.
    Voxels(PathBuf),
    Shape(ShapeConfig),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Sphere {
        radius: u32,
    },
    Cuboid {
        half_extents: [u32; 3],
    },
    Ellipsoid {
        radii: [f64; 3],
        /// Roll, pitch, yaw in degrees.
        #[serde(default)]
        euler_deg: [f64; 3],
    },
}

impl ShapeConfig {
    pub fn build(&self) -> crate::error::Result<OccupancyGrid> {
        match self {
            ShapeConfig::Sphere { radius } => shapes::sphere(*radius, 0),
            ShapeConfig::Cuboid { half_extents } => shapes::cuboid(*half_extents, 0),
            ShapeConfig::Ellipsoid { radii, euler_deg } => {
                let [r, p, y] = euler_deg.map(f64::to_radians);
                shapes::ellipsoid(*radii, Rotation3::from_euler_angles(r, p, y), 0)
            }
        }
    }
}

impl InputSource {
    pub fn load(&self) -> Result<OccupancyGrid, String> {
        match self {
            InputSource::Voxels(path) => load_voxel_set(path),
            InputSource::Shape(shape) => shape.build().map_err(|e| e.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Pgm,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Pgm => "pgm",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileDemoOutputConfig {
    /// Images are written as `<prefix>_m`, `<prefix>_s`, `<prefix>_t`.
    pub prefix: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    #[serde(default)]
    pub format: ImageFormat,
    /// Directory for the plane and lifted-profile voxel sets.
    #[serde(default)]
    pub debug_volumes: Option<PathBuf>,
}

impl ProfileDemoOutputConfig {
    /// Image path for the profile with the given label.
    pub fn image_path(&self, label: &str) -> PathBuf {
        let mut name = self
            .prefix
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profile".into());
        name.push(format!("_{label}.{}", self.format.extension()));
        self.prefix.with_file_name(name)
    }
}

pub fn load_config(path: &Path) -> Result<ProfileDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<ProfileDemoConfig, serde_json::Error> {
    serde_json::from_str(data)
}
