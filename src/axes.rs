//! Principal-axis extraction from an occupancy grid (3D PCA).
//!
//! The occupied voxel coordinates are reduced to their centroid and
//! population covariance (divisor `count`, not `count − 1`). The symmetric
//! 3×3 matrix is eigendecomposed with `nalgebra::SymmetricEigen` and the
//! eigenpairs are ranked by decreasing eigenvalue:
//!
//! - eigenvalues closer than `TIE_REL_EPS × max|λ|` are tied; tied pairs are
//!   ordered by the dominant component of their eigenvector (x, then y,
//!   then z), so symmetric solids give a reproducible frame;
//! - each eigenvector is normalized and its dominant component made
//!   positive, which removes the solver's sign ambiguity.
//!
//! An empty grid yields the degenerate frame (three zero axes) instead of an
//! error. Near-equal eigenvalues are not treated as errors either, but the
//! axis order is then sensitive to small perturbations of the input.

use crate::types::Direction;
use crate::volume::OccupancyGrid;
use log::{debug, warn};
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use serde::Serialize;

const TIE_REL_EPS: f64 = 1e-9;

/// Ranked principal axes of an occupied voxel set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrincipalFrame {
    /// Axes ordered primary, secondary, tertiary. Zero vectors when degenerate.
    pub axes: [Vector3<f64>; 3],
    /// Variance along each axis, non-increasing.
    pub eigenvalues: [f64; 3],
    pub centroid: Option<Point3<f64>>,
    pub occupied: usize,
}

impl PrincipalFrame {
    pub fn degenerate() -> Self {
        Self {
            axes: [Vector3::zeros(); 3],
            eigenvalues: [0.0; 3],
            centroid: None,
            occupied: 0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.occupied == 0 || self.axes.iter().any(|a| a.norm() == 0.0)
    }

    pub fn primary(&self) -> Option<Direction> {
        self.axis(0)
    }

    pub fn secondary(&self) -> Option<Direction> {
        self.axis(1)
    }

    pub fn tertiary(&self) -> Option<Direction> {
        self.axis(2)
    }

    /// Axis of the given rank (0 = primary), `None` for a zero axis.
    pub fn axis(&self, rank: usize) -> Option<Direction> {
        self.axes.get(rank).and_then(|a| Direction::new(*a))
    }

    /// All three directions, `None` for the degenerate frame.
    pub fn directions(&self) -> Option<[Direction; 3]> {
        Some([self.axis(0)?, self.axis(1)?, self.axis(2)?])
    }
}

/// Centroid and population covariance of the occupied voxels.
pub fn covariance_of(grid: &OccupancyGrid) -> Option<(Point3<f64>, Matrix3<f64>, usize)> {
    let mut sum = Vector3::<f64>::zeros();
    let mut count = 0usize;
    for p in grid.occupied_points() {
        sum += p.coords.cast::<f64>();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let centroid = Point3::from(sum / count as f64);

    let (mut cxx, mut cxy, mut cxz, mut cyy, mut cyz, mut czz) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    for p in grid.occupied_points() {
        let d = p.cast::<f64>() - centroid;
        cxx += d.x * d.x;
        cxy += d.x * d.y;
        cxz += d.x * d.z;
        cyy += d.y * d.y;
        cyz += d.y * d.z;
        czz += d.z * d.z;
    }
    #[rustfmt::skip]
    let cov = Matrix3::new(
        cxx, cxy, cxz,
        cxy, cyy, cyz,
        cxz, cyz, czz,
    ) / count as f64;
    Some((centroid, cov, count))
}

/// Compute the principal frame of the occupied voxels of `grid`.
pub fn extract_principal_frame(grid: &OccupancyGrid) -> PrincipalFrame {
    let Some((centroid, cov, count)) = covariance_of(grid) else {
        warn!("principal axes: grid has no occupied voxel, returning degenerate frame");
        return PrincipalFrame::degenerate();
    };
    let eig = SymmetricEigen::new(cov);
    let values = [eig.eigenvalues[0], eig.eigenvalues[1], eig.eigenvalues[2]];
    let vectors = [
        eig.eigenvectors.column(0).clone_owned(),
        eig.eigenvectors.column(1).clone_owned(),
        eig.eigenvectors.column(2).clone_owned(),
    ];
    let (eigenvalues, axes) = rank_eigenpairs(values, vectors);
    debug!(
        "principal axes: count={} centroid=({:.3}, {:.3}, {:.3}) eigenvalues=[{:.4}, {:.4}, {:.4}]",
        count, centroid.x, centroid.y, centroid.z, eigenvalues[0], eigenvalues[1], eigenvalues[2]
    );
    PrincipalFrame {
        axes,
        eigenvalues,
        centroid: Some(centroid),
        occupied: count,
    }
}

/// Order eigenpairs by decreasing eigenvalue with the dominant-axis tie rule,
/// normalizing and sign-canonicalizing each eigenvector.
pub fn rank_eigenpairs(
    values: [f64; 3],
    vectors: [Vector3<f64>; 3],
) -> ([f64; 3], [Vector3<f64>; 3]) {
    let scale = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let tol = TIE_REL_EPS * scale;
    let tied = |a: usize, b: usize| (values[a] - values[b]).abs() <= tol;

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    // Reorder tied neighbours by dominant axis; three elements need at most
    // two bubble passes.
    for _ in 0..2 {
        for i in 0..2 {
            let (a, b) = (order[i], order[i + 1]);
            if tied(a, b) && dominant_axis(&vectors[a]) > dominant_axis(&vectors[b]) {
                order.swap(i, i + 1);
            }
        }
    }

    let ranked_values = order.map(|i| values[i]);
    let ranked_vectors = order.map(|i| canonical_axis(&vectors[i]));
    (ranked_values, ranked_vectors)
}

fn dominant_axis(v: &Vector3<f64>) -> usize {
    v.iamax()
}

fn canonical_axis(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Vector3::zeros();
    }
    let unit = v / norm;
    if unit[dominant_axis(&unit)] < 0.0 {
        -unit
    } else {
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridPoint;
    use crate::volume::Domain3;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn grid_from(points: &[[i32; 3]], r: i32) -> OccupancyGrid {
        let domain = Domain3::new(GridPoint::new(-r, -r, -r), GridPoint::new(r, r, r)).unwrap();
        OccupancyGrid::from_points(domain, points.iter().map(|&p| GridPoint::from(p))).unwrap()
    }

    #[test]
    fn empty_grid_gives_degenerate_frame() {
        let frame = extract_principal_frame(&grid_from(&[], 2));
        assert!(frame.is_degenerate());
        assert!(frame.directions().is_none());
        assert_eq!(frame.axes, [Vector3::zeros(); 3]);
    }

    #[test]
    fn covariance_uses_population_divisor() {
        let grid = grid_from(&[[-1, 0, 0], [1, 0, 0]], 2);
        let (centroid, cov, count) = covariance_of(&grid).expect("non-empty");
        assert_eq!(count, 2);
        assert_eq!(centroid, Point3::origin());
        // ((-1)^2 + 1^2) / 2
        assert!(approx_eq(cov[(0, 0)], 1.0, 1e-12));
        assert!(approx_eq(cov[(1, 1)], 0.0, 1e-12));
    }

    #[test]
    fn elongated_points_give_x_primary() {
        let mut pts = Vec::new();
        for x in -6..=6 {
            for y in -2..=2 {
                pts.push([x, y, 0]);
            }
        }
        let frame = extract_principal_frame(&grid_from(&pts, 7));
        let [p, s, t] = frame.directions().expect("non-degenerate");
        assert!(approx_eq(p.dot(&Direction::x_axis()), 1.0, 1e-9));
        assert!(approx_eq(s.dot(&Direction::y_axis()), 1.0, 1e-9));
        assert!(approx_eq(t.dot(&Direction::z_axis()), 1.0, 1e-9));
        assert!(approx_eq(frame.eigenvalues[2], 0.0, 1e-9));
    }

    #[test]
    fn ranking_is_descending() {
        let values = [1.0, 5.0, 3.0];
        let vectors = [Vector3::x(), Vector3::y(), Vector3::z()];
        let (v, axes) = rank_eigenpairs(values, vectors);
        assert_eq!(v, [5.0, 3.0, 1.0]);
        assert_eq!(axes, [Vector3::y(), Vector3::z(), Vector3::x()]);
    }

    #[test]
    fn ties_are_ordered_by_dominant_axis() {
        let values = [2.0, 2.0, 2.0];
        let vectors = [Vector3::z(), -Vector3::x(), Vector3::y()];
        let (_, axes) = rank_eigenpairs(values, vectors);
        // -x is flipped to +x by sign canonicalization
        assert_eq!(axes, [Vector3::x(), Vector3::y(), Vector3::z()]);

        let values = [1.0, 4.0, 4.0 + 1e-12];
        let vectors = [Vector3::x(), Vector3::z(), Vector3::y()];
        let (v, axes) = rank_eigenpairs(values, vectors);
        assert_eq!(axes, [Vector3::y(), Vector3::z(), Vector3::x()]);
        assert!(v[0] >= v[1] && v[1] >= v[2] - 1e-9);
    }

    #[test]
    fn vectors_are_normalized_and_sign_canonical() {
        let values = [3.0, 2.0, 1.0];
        let vectors = [
            Vector3::new(0.0, -2.0, 0.0),
            Vector3::new(-3.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
        ];
        let (_, axes) = rank_eigenpairs(values, vectors);
        assert_eq!(axes[0], Vector3::y());
        assert!(approx_eq(axes[1].norm(), 1.0, 1e-12));
        assert!(axes[1].z > 0.0);
        assert_eq!(axes[2], Vector3::zeros());
    }
}
