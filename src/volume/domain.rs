use crate::error::{ProfileError, Result};
use crate::types::GridPoint;
use nalgebra::Vector3;
use serde::Serialize;

/// Inclusive axis-aligned integer box `[lower, upper]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Domain3 {
    lower: GridPoint,
    upper: GridPoint,
}

impl Domain3 {
    pub fn new(lower: GridPoint, upper: GridPoint) -> Result<Self> {
        if lower.x > upper.x || lower.y > upper.y || lower.z > upper.z {
            return Err(ProfileError::InvalidDomain {
                lower: [lower.x, lower.y, lower.z],
                upper: [upper.x, upper.y, upper.z],
            });
        }
        Ok(Self { lower, upper })
    }

    /// Cube `[-half, half]³`; `half` saturates at `i32::MAX`.
    pub fn centered_cube(half: u32) -> Self {
        let h = i32::try_from(half).unwrap_or(i32::MAX);
        Self {
            lower: GridPoint::new(-h, -h, -h),
            upper: GridPoint::new(h, h, h),
        }
    }

    #[inline]
    pub fn lower(&self) -> GridPoint {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> GridPoint {
        self.upper
    }

    /// Number of voxels along each axis.
    pub fn size(&self) -> [usize; 3] {
        [
            (self.upper.x - self.lower.x) as usize + 1,
            (self.upper.y - self.lower.y) as usize + 1,
            (self.upper.z - self.lower.z) as usize + 1,
        ]
    }

    pub fn len(&self) -> usize {
        let [sx, sy, sz] = self.size();
        sx * sy * sz
    }

    /// Always false: a domain holds at least one voxel.
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, p: &GridPoint) -> bool {
        p.x >= self.lower.x
            && p.x <= self.upper.x
            && p.y >= self.lower.y
            && p.y <= self.upper.y
            && p.z >= self.lower.z
            && p.z <= self.upper.z
    }

    /// Integer midpoint of the bounds (division truncates toward zero).
    pub fn center(&self) -> GridPoint {
        GridPoint::new(
            (self.lower.x + self.upper.x) / 2,
            (self.lower.y + self.upper.y) / 2,
            (self.lower.z + self.upper.z) / 2,
        )
    }

    /// Euclidean length of the `lower → upper` diagonal.
    pub fn diagonal_length(&self) -> f64 {
        let d: Vector3<f64> = (self.upper - self.lower).cast::<f64>();
        d.norm()
    }

    /// Domain grown by `amount` voxels on every side. Fails when a bound
    /// would leave the `i32` range.
    pub fn padded(&self, amount: u32) -> Result<Self> {
        let overflow = || {
            ProfileError::InvalidParams(format!(
                "padding {amount} overflows domain {:?}..{:?}",
                self.lower, self.upper
            ))
        };
        let pad = i32::try_from(amount).map_err(|_| overflow())?;
        let grow = |lo: i32, hi: i32| -> Result<(i32, i32)> {
            Ok((
                lo.checked_sub(pad).ok_or_else(overflow)?,
                hi.checked_add(pad).ok_or_else(overflow)?,
            ))
        };
        let (lx, ux) = grow(self.lower.x, self.upper.x)?;
        let (ly, uy) = grow(self.lower.y, self.upper.y)?;
        let (lz, uz) = grow(self.lower.z, self.upper.z)?;
        Ok(Self {
            lower: GridPoint::new(lx, ly, lz),
            upper: GridPoint::new(ux, uy, uz),
        })
    }

    /// Linear x-fastest index of `p`, `None` outside the domain.
    #[inline]
    pub fn index(&self, p: &GridPoint) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let [sx, sy, _] = self.size();
        let x = (p.x - self.lower.x) as usize;
        let y = (p.y - self.lower.y) as usize;
        let z = (p.z - self.lower.z) as usize;
        Some((z * sy + y) * sx + x)
    }

    /// Inverse of [`Domain3::index`]. `index` must be `< self.len()`.
    #[inline]
    pub fn point_at(&self, index: usize) -> GridPoint {
        let [sx, sy, _] = self.size();
        let x = index % sx;
        let y = (index / sx) % sy;
        let z = index / (sx * sy);
        GridPoint::new(
            self.lower.x + x as i32,
            self.lower.y + y as i32,
            self.lower.z + z as i32,
        )
    }

    /// All points in x-fastest order.
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.len()).map(move |i| self.point_at(i))
    }
}
