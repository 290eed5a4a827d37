use super::Domain3;
use crate::error::{ProfileError, Result};
use crate::types::GridPoint;

/// Dense voxel volume: one `u32` per domain point, x-fastest.
///
/// The grid is read-only for the analysis stages and is `Sync`, so several
/// scans may share it.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    domain: Domain3,
    data: Vec<u32>,
}

impl OccupancyGrid {
    /// Empty grid over `domain`.
    pub fn new(domain: Domain3) -> Self {
        Self {
            domain,
            data: vec![0; domain.len()],
        }
    }

    /// Grid with value `1` at each listed point.
    pub fn from_points<I>(domain: Domain3, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = GridPoint>,
    {
        let mut grid = Self::new(domain);
        for p in points {
            grid.set(&p, 1)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn domain(&self) -> &Domain3 {
        &self.domain
    }

    /// Stored value, `None` outside the domain.
    #[inline]
    pub fn value(&self, p: &GridPoint) -> Option<u32> {
        self.domain.index(p).map(|i| self.data[i])
    }

    /// Occupancy test; points outside the domain are empty.
    #[inline]
    pub fn is_occupied(&self, p: &GridPoint) -> bool {
        self.value(p).is_some_and(|v| v != 0)
    }

    pub fn set(&mut self, p: &GridPoint, value: u32) -> Result<()> {
        let i = self
            .domain
            .index(p)
            .ok_or(ProfileError::PointOutsideDomain(*p))?;
        self.data[i] = value;
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Occupied points in x-fastest order.
    pub fn occupied_points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| self.domain.point_at(i))
    }

    /// Copy of the grid inside a domain grown by `amount` on every side.
    pub fn padded(&self, amount: u32) -> Result<Self> {
        let mut out = Self::new(self.domain.padded(amount)?);
        for (i, &v) in self.data.iter().enumerate() {
            if v == 0 {
                continue;
            }
            let p = self.domain.point_at(i);
            if let Some(j) = out.domain.index(&p) {
                out.data[j] = v;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_domain(lo: i32, hi: i32) -> Domain3 {
        Domain3::new(GridPoint::new(lo, lo, lo), GridPoint::new(hi, hi, hi)).expect("domain")
    }

    #[test]
    fn out_of_domain_reads_as_empty() {
        let grid = OccupancyGrid::new(cube_domain(0, 3));
        assert_eq!(grid.value(&GridPoint::new(4, 0, 0)), None);
        assert!(!grid.is_occupied(&GridPoint::new(-1, 0, 0)));
    }

    #[test]
    fn from_points_rejects_outside_points() {
        let err = OccupancyGrid::from_points(cube_domain(0, 3), [GridPoint::new(0, 0, 9)]);
        assert_eq!(
            err,
            Err(ProfileError::PointOutsideDomain(GridPoint::new(0, 0, 9)))
        );
    }

    #[test]
    fn nonzero_values_count_as_occupied() {
        let mut grid = OccupancyGrid::new(cube_domain(0, 3));
        grid.set(&GridPoint::new(1, 2, 3), 7).expect("inside");
        assert!(grid.is_occupied(&GridPoint::new(1, 2, 3)));
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(
            grid.occupied_points().collect::<Vec<_>>(),
            vec![GridPoint::new(1, 2, 3)]
        );
    }

    #[test]
    fn padding_preserves_values() {
        let pts = [GridPoint::new(0, 0, 0), GridPoint::new(2, 1, 3)];
        let grid = OccupancyGrid::from_points(cube_domain(0, 3), pts).expect("grid");
        let padded = grid.padded(4).expect("small padding");
        assert_eq!(padded.domain().lower(), GridPoint::new(-4, -4, -4));
        assert_eq!(padded.occupied_count(), 2);
        assert_eq!(padded.value(&GridPoint::new(2, 1, 3)), Some(1));
        assert!(matches!(
            grid.padded(u32::MAX),
            Err(ProfileError::InvalidParams(_))
        ));
    }
}
