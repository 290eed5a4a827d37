//! 2D → 3D plane embedding used by the profile scanner.
//!
//! A [`PlaneEmbedder`] owns a plane origin (kept in real coordinates), a
//! fixed orthonormal in-plane basis `(u, v)` with `u × v = normal`, and an
//! isotropic pixel scale. Pixel `(x, y)` of a `W × H` raster maps to
//!
//! ```text
//! round(origin + (x − W/2)·s·u + (y − H/2)·s·v),   s = width / W
//! ```
//!
//! so the raster spans `width` grid units horizontally, centred on the origin.
//! The origin is the only mutable state; [`PlaneEmbedder::shift_origin`]
//! advances it, which makes the embedder the scan's stepping cursor.

use crate::error::{ProfileError, Result};
use crate::geometry::in_plane_axis;
use crate::image::ProfileImage;
use crate::types::{Direction, GridPoint};
use crate::volume::{Domain3, OccupancyGrid};
use nalgebra::{Point3, Vector3};

#[derive(Clone, Debug)]
pub struct PlaneEmbedder {
    domain: Domain3,
    origin: Point3<f64>,
    u_axis: Direction,
    v_axis: Direction,
    pixel_scale: f64,
    half_w: f64,
    half_h: f64,
}

impl PlaneEmbedder {
    /// Build an embedder for a `size = [W, H]` raster spanning `width` grid
    /// units. `secondary` fixes the horizontal image axis; when omitted it is
    /// derived from the global axis least parallel to `normal`.
    pub fn new(
        domain: Domain3,
        origin: GridPoint,
        normal: Direction,
        secondary: Option<Direction>,
        width: f64,
        size: [usize; 2],
    ) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ProfileError::InvalidParams(format!(
                "scan width must be positive, got {width}"
            )));
        }
        if size[0] == 0 || size[1] == 0 {
            return Err(ProfileError::InvalidParams(format!(
                "image size must be non-empty, got {}x{}",
                size[0], size[1]
            )));
        }
        let u_axis = in_plane_axis(&normal, secondary.as_ref())?;
        let v_axis = normal.cross(&u_axis).ok_or_else(|| {
            ProfileError::DegenerateDirection("could not complete the in-plane basis".to_string())
        })?;
        Ok(Self {
            domain,
            origin: origin.cast::<f64>(),
            u_axis,
            v_axis,
            pixel_scale: width / size[0] as f64,
            half_w: size[0] as f64 / 2.0,
            half_h: size[1] as f64 / 2.0,
        })
    }

    /// Plane origin rounded to the grid.
    pub fn origin(&self) -> GridPoint {
        round_point(&self.origin)
    }

    /// In-plane axes `(u, v)`; `u × v` equals the normal.
    pub fn basis(&self) -> (&Direction, &Direction) {
        (&self.u_axis, &self.v_axis)
    }

    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    /// Grid point under pixel `[x, y]`, possibly outside the domain.
    #[inline]
    pub fn embed(&self, pixel: [usize; 2]) -> GridPoint {
        let du = (pixel[0] as f64 - self.half_w) * self.pixel_scale;
        let dv = (pixel[1] as f64 - self.half_h) * self.pixel_scale;
        let p = self.origin + self.u_axis.as_vector() * du + self.v_axis.as_vector() * dv;
        round_point(&p)
    }

    /// Grid point under pixel `[x, y]`, `None` outside the domain.
    #[inline]
    pub fn embed_checked(&self, pixel: [usize; 2]) -> Option<GridPoint> {
        let p = self.embed(pixel);
        self.domain.contains(&p).then_some(p)
    }

    /// Occupancy under pixel `[x, y]`; points outside the domain are empty.
    #[inline]
    pub fn sample(&self, grid: &OccupancyGrid, pixel: [usize; 2]) -> bool {
        self.embed_checked(pixel).is_some_and(|p| grid.is_occupied(&p))
    }

    /// Advance the plane origin by `step`.
    pub fn shift_origin(&mut self, step: &Vector3<f64>) {
        self.origin += *step;
    }

    /// Grid points of every hit pixel of `profile` on the current plane,
    /// skipping those that fall outside the domain.
    pub fn lift_profile(&self, profile: &ProfileImage) -> Vec<GridPoint> {
        profile
            .hits()
            .filter_map(|px| self.embed_checked(px))
            .collect()
    }
}

#[inline]
fn round_point(p: &Point3<f64>) -> GridPoint {
    GridPoint::new(p.x.round() as i32, p.y.round() as i32, p.z.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(r: i32) -> Domain3 {
        Domain3::new(GridPoint::new(-r, -r, -r), GridPoint::new(r, r, r)).unwrap()
    }

    #[test]
    fn basis_is_right_handed() {
        let normal = Direction::from_xyz(0.3, -0.5, 0.8).unwrap();
        let e = PlaneEmbedder::new(domain(10), GridPoint::origin(), normal, None, 20.0, [20, 20])
            .unwrap();
        let (u, v) = e.basis();
        assert!(u.dot(v).abs() < 1e-12);
        assert!(u.dot(&normal).abs() < 1e-12);
        let n = u.as_vector().cross(v.as_vector());
        assert!((n - normal.as_vector()).norm() < 1e-12);
    }

    #[test]
    fn image_centre_maps_to_origin() {
        let e = PlaneEmbedder::new(
            domain(10),
            GridPoint::new(1, 2, 3),
            Direction::z_axis(),
            None,
            8.0,
            [8, 8],
        )
        .unwrap();
        assert_eq!(e.embed([4, 4]), GridPoint::new(1, 2, 3));
        // u = x, v = z × x = y
        assert_eq!(e.embed([0, 4]), GridPoint::new(-3, 2, 3));
        assert_eq!(e.embed([4, 7]), GridPoint::new(1, 5, 3));
    }

    #[test]
    fn width_sets_pixel_scale() {
        let e = PlaneEmbedder::new(
            domain(20),
            GridPoint::origin(),
            Direction::z_axis(),
            None,
            20.0,
            [10, 10],
        )
        .unwrap();
        assert_eq!(e.pixel_scale(), 2.0);
        assert_eq!(e.embed([0, 0]), GridPoint::new(-10, -10, 0));
        assert_eq!(e.embed([9, 0]), GridPoint::new(8, -10, 0));
    }

    #[test]
    fn explicit_secondary_sets_horizontal_axis() {
        let e = PlaneEmbedder::new(
            domain(10),
            GridPoint::origin(),
            Direction::x_axis(),
            Some(Direction::z_axis()),
            4.0,
            [4, 4],
        )
        .unwrap();
        // u = z, v = x × z = -y
        assert_eq!(e.embed([3, 2]), GridPoint::new(0, 0, 1));
        assert_eq!(e.embed([2, 3]), GridPoint::new(0, -1, 0));
    }

    #[test]
    fn shifting_accumulates_without_drift() {
        let normal = Direction::from_xyz(1.0, 2.0, 0.0).unwrap();
        let mut e =
            PlaneEmbedder::new(domain(30), GridPoint::origin(), normal, None, 4.0, [4, 4]).unwrap();
        for _ in 0..10 {
            e.shift_origin(normal.as_vector());
        }
        let expected = normal.as_vector() * 10.0;
        assert_eq!(
            e.origin(),
            GridPoint::new(
                expected.x.round() as i32,
                expected.y.round() as i32,
                expected.z.round() as i32
            )
        );
    }

    #[test]
    fn sampling_outside_domain_is_empty() {
        let d = domain(2);
        let mut grid = OccupancyGrid::new(d);
        grid.set(&GridPoint::new(2, 0, 0), 1).unwrap();
        let mut e =
            PlaneEmbedder::new(d, GridPoint::origin(), Direction::z_axis(), None, 16.0, [16, 16])
                .unwrap();
        assert_eq!(e.embed_checked([0, 0]), None);
        assert!(!e.sample(&grid, [0, 0]));
        assert!(e.sample(&grid, [10, 8]));
        e.shift_origin(&Vector3::new(0.0, 0.0, 5.0));
        assert!(!e.sample(&grid, [10, 8]));
    }

    #[test]
    fn lift_profile_returns_hit_points() {
        let e = PlaneEmbedder::new(
            domain(5),
            GridPoint::new(0, 0, 2),
            Direction::z_axis(),
            None,
            4.0,
            [4, 4],
        )
        .unwrap();
        let mut img = ProfileImage::new(4, 4);
        img.mark_hit(2, 2);
        img.mark_hit(3, 2);
        assert_eq!(
            e.lift_profile(&img),
            vec![GridPoint::new(0, 0, 2), GridPoint::new(1, 0, 2)]
        );
    }
}
