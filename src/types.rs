use nalgebra::{Point3, Vector3};
use serde::Serialize;
use std::ops::Neg;

/// Integer voxel coordinate.
pub type GridPoint = Point3<i32>;

const MIN_NORM: f64 = 1e-12;

/// Unit-length direction in grid coordinates.
///
/// Construction normalizes the input, so every `Direction` satisfies
/// `‖d‖ = 1` up to floating tolerance. Zero and non-finite vectors are
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Direction(Vector3<f64>);

impl Direction {
    pub fn new(v: Vector3<f64>) -> Option<Self> {
        let norm = v.norm();
        if !norm.is_finite() || norm < MIN_NORM {
            return None;
        }
        Some(Self(v / norm))
    }

    pub fn from_xyz(x: f64, y: f64, z: f64) -> Option<Self> {
        Self::new(Vector3::new(x, y, z))
    }

    pub fn x_axis() -> Self {
        Self(Vector3::x())
    }

    pub fn y_axis() -> Self {
        Self(Vector3::y())
    }

    pub fn z_axis() -> Self {
        Self(Vector3::z())
    }

    #[inline]
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    #[inline]
    pub fn dot(&self, other: &Direction) -> f64 {
        self.0.dot(&other.0)
    }

    /// Unit vector orthogonal to both directions, `None` when they are parallel.
    pub fn cross(&self, other: &Direction) -> Option<Direction> {
        Self::new(self.0.cross(&other.0))
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        Direction(-self.0)
    }
}

impl From<Direction> for Vector3<f64> {
    fn from(d: Direction) -> Self {
        d.0
    }
}
