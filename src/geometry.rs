//! Grid-space geometry helpers shared by the axis extractor and the scanner.

use crate::error::{ProfileError, Result};
use crate::types::{Direction, GridPoint};
use crate::volume::{Domain3, OccupancyGrid};
use nalgebra::Vector3;

/// Cosine above which a secondary hint is considered parallel to the normal.
const PARALLEL_COS: f64 = 1.0 - 1e-9;

/// `origin + round(direction * offset)`, rounding each component half away
/// from zero.
pub fn move_along(origin: &GridPoint, direction: &Direction, offset: f64) -> GridPoint {
    let v = direction.as_vector() * offset;
    GridPoint::new(
        origin.x + v.x.round() as i32,
        origin.y + v.y.round() as i32,
        origin.z + v.z.round() as i32,
    )
}

/// Extent of the occupied voxels along `direction`:
/// `ceil(max(p·d) − min(p·d))`. `None` when nothing is occupied.
pub fn estimate_extent(grid: &OccupancyGrid, direction: &Direction) -> Option<i32> {
    let d = direction.as_vector();
    let mut min_proj = f64::INFINITY;
    let mut max_proj = f64::NEG_INFINITY;
    for p in grid.occupied_points() {
        let proj = p.coords.cast::<f64>().dot(d);
        min_proj = min_proj.min(proj);
        max_proj = max_proj.max(proj);
    }
    if min_proj > max_proj {
        return None;
    }
    Some((max_proj - min_proj).ceil() as i32)
}

/// Global axis least parallel to `normal` (smallest absolute component,
/// ties resolved x, then y, then z).
pub fn least_parallel_axis(normal: &Direction) -> Direction {
    let n = normal.as_vector().abs();
    if n.x <= n.y && n.x <= n.z {
        Direction::x_axis()
    } else if n.y <= n.z {
        Direction::y_axis()
    } else {
        Direction::z_axis()
    }
}

/// Unit in-plane axis orthogonal to `normal`.
///
/// With a `hint`, the hint's component along `normal` is removed; without
/// one, the least parallel global axis is used the same way, which keeps the
/// basis well conditioned for any normal.
pub fn in_plane_axis(normal: &Direction, hint: Option<&Direction>) -> Result<Direction> {
    let reference = match hint {
        Some(h) => {
            if h.dot(normal).abs() >= PARALLEL_COS {
                return Err(ProfileError::DegenerateDirection(
                    "secondary axis is parallel to the scan normal".to_string(),
                ));
            }
            *h
        }
        None => least_parallel_axis(normal),
    };
    let n = normal.as_vector();
    let r = reference.as_vector();
    let projected: Vector3<f64> = r - n * r.dot(n);
    Direction::new(projected).ok_or_else(|| {
        ProfileError::DegenerateDirection("in-plane axis vanished after projection".to_string())
    })
}

/// Voxels of `domain` within half a voxel of the plane through `center` with
/// the given `normal`.
pub fn voxel_plane(domain: &Domain3, normal: &Direction, center: &GridPoint) -> OccupancyGrid {
    let n = normal.as_vector();
    let offset = n.dot(&center.coords.cast::<f64>());
    let mut grid = OccupancyGrid::new(*domain);
    for p in domain.points() {
        let dist = (n.dot(&p.coords.cast::<f64>()) - offset).abs();
        if dist < 0.5 {
            // `p` comes from the domain, so `set` cannot fail.
            let _ = grid.set(&p, 1);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn move_along_unit_axis() {
        let p = move_along(&GridPoint::origin(), &Direction::x_axis(), 5.0);
        assert_eq!(p, GridPoint::new(5, 0, 0));
    }

    #[test]
    fn move_along_rounds_each_component() {
        let d = Direction::from_xyz(1.0, 1.0, 0.0).unwrap();
        // 10 / sqrt(2) = 7.07 -> 7
        let p = move_along(&GridPoint::new(1, 2, 3), &-d, 10.0);
        assert_eq!(p, GridPoint::new(-6, -5, 3));
    }

    #[test]
    fn extent_between_two_points() {
        let domain = Domain3::new(GridPoint::new(-1, -1, -1), GridPoint::new(11, 1, 1)).unwrap();
        let grid =
            OccupancyGrid::from_points(domain, [GridPoint::new(0, 0, 0), GridPoint::new(10, 0, 0)])
                .unwrap();
        assert_eq!(estimate_extent(&grid, &Direction::x_axis()), Some(10));
        assert_eq!(estimate_extent(&grid, &Direction::y_axis()), Some(0));
        let diag = Direction::from_xyz(1.0, 1.0, 0.0).unwrap();
        // 10 / sqrt(2) = 7.07 -> 8
        assert_eq!(estimate_extent(&grid, &diag), Some(8));
    }

    #[test]
    fn extent_of_empty_grid_is_none() {
        let domain = Domain3::new(GridPoint::new(0, 0, 0), GridPoint::new(2, 2, 2)).unwrap();
        let grid = OccupancyGrid::new(domain);
        assert_eq!(estimate_extent(&grid, &Direction::z_axis()), None);
    }

    #[test]
    fn implicit_axis_is_orthogonal_for_each_principal_direction() {
        let cases = [
            (Direction::x_axis(), Direction::y_axis()),
            (Direction::y_axis(), Direction::x_axis()),
            (Direction::z_axis(), Direction::x_axis()),
        ];
        for (normal, expected) in cases {
            let axis = in_plane_axis(&normal, None).expect("axis");
            assert!(approx_eq(axis.dot(&normal), 0.0));
            assert!(
                approx_eq(axis.dot(&expected), 1.0),
                "normal {:?} gave {:?}",
                normal,
                axis
            );
        }
    }

    #[test]
    fn implicit_axis_for_oblique_normal() {
        let normal = Direction::from_xyz(0.2, 0.9, -0.4).unwrap();
        let axis = in_plane_axis(&normal, None).expect("axis");
        assert!(approx_eq(axis.dot(&normal), 0.0));
        assert!(approx_eq(axis.as_vector().norm(), 1.0));
        // least parallel is x
        assert!(axis.as_vector().x > 0.9);
    }

    #[test]
    fn hint_is_orthogonalized() {
        let normal = Direction::z_axis();
        let hint = Direction::from_xyz(1.0, 0.0, 1.0).unwrap();
        let axis = in_plane_axis(&normal, Some(&hint)).expect("axis");
        assert!(approx_eq(axis.dot(&Direction::x_axis()), 1.0));
    }

    #[test]
    fn parallel_hint_is_rejected() {
        let normal = Direction::y_axis();
        let err = in_plane_axis(&normal, Some(&-normal));
        assert!(matches!(err, Err(ProfileError::DegenerateDirection(_))));
    }

    #[test]
    fn voxel_plane_is_one_voxel_thick_for_axis_normal() {
        let domain = Domain3::new(GridPoint::new(0, 0, 0), GridPoint::new(4, 4, 4)).unwrap();
        let plane = voxel_plane(&domain, &Direction::z_axis(), &GridPoint::new(2, 2, 2));
        assert_eq!(plane.occupied_count(), 25);
        assert!(plane.occupied_points().all(|p| p.z == 2));
    }
}
