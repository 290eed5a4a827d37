//! Synthetic solids for demos and tests.
//!
//! Each builder returns a grid centred at the origin whose domain is the
//! solid's bounding box grown by `padding` voxels, so scans that start
//! `padding` units outside the solid stay addressable. Building fails when
//! the padded domain leaves the `i32` range.

use crate::error::Result;
use crate::types::GridPoint;
use crate::volume::{Domain3, OccupancyGrid};
use nalgebra::{Rotation3, Vector3};

/// Filled ball `x² + y² + z² ≤ r²`.
pub fn sphere(radius: u32, padding: u32) -> Result<OccupancyGrid> {
    let r2 = i64::from(radius).pow(2);
    fill(radius, padding, |p| {
        let c = p.coords.cast::<i64>();
        c.x * c.x + c.y * c.y + c.z * c.z <= r2
    })
}

/// Filled box `|x| ≤ hx, |y| ≤ hy, |z| ≤ hz`.
pub fn cuboid(half_extents: [u32; 3], padding: u32) -> Result<OccupancyGrid> {
    let h = half_extents.map(|v| v as i32);
    let reach = half_extents.iter().copied().max().unwrap_or(0);
    fill(reach, padding, |p| {
        p.x.abs() <= h[0] && p.y.abs() <= h[1] && p.z.abs() <= h[2]
    })
}

/// Filled ellipsoid with semi-axes `radii` along the columns of `rotation`.
pub fn ellipsoid(
    radii: [f64; 3],
    rotation: Rotation3<f64>,
    padding: u32,
) -> Result<OccupancyGrid> {
    let reach = radii.iter().fold(0.0f64, |m, r| m.max(r.abs())).ceil() as u32;
    let inv = rotation.inverse();
    fill(reach, padding, |p| {
        let local: Vector3<f64> = inv * p.coords.cast::<f64>();
        let q = Vector3::new(
            local.x / radii[0],
            local.y / radii[1],
            local.z / radii[2],
        );
        q.norm_squared() <= 1.0
    })
}

fn fill<F>(reach: u32, padding: u32, inside: F) -> Result<OccupancyGrid>
where
    F: Fn(&GridPoint) -> bool,
{
    let bounds = Domain3::centered_cube(reach);
    let mut grid = OccupancyGrid::new(bounds.padded(padding)?);
    for p in bounds.points().filter(|p| inside(p)) {
        // `bounds` lies inside the padded domain.
        let _ = grid.set(&p, 1);
    }
    Ok(grid)
}
