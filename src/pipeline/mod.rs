//! End-to-end profile extraction.
//!
//! `ProfilePipeline::run` chains these stages on an already voxelized solid:
//!
//! 1. principal axes of the occupied voxels;
//! 2. per-axis scan budgets (fixed, or the solid's extent along the axis);
//! 3. padding of the volume by the largest budget;
//! 4. one profile scan per axis (concurrently with the `parallel` feature);
//! 5. a [`ProfileReport`] with per-stage timings.
//!
//! Profiles are labelled `m`, `s`, `t` (primary, secondary, tertiary), the
//! suffixes used for the output images.

mod params;

pub use params::{PipelineParams, ScanBudget};

use crate::axes::{extract_principal_frame, PrincipalFrame};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{AxesStage, InputDescriptor, ProfileReport, ScanStage, TimingBreakdown};
use crate::embed::PlaneEmbedder;
use crate::error::{ProfileError, Result};
use crate::geometry::{estimate_extent, voxel_plane};
use crate::image::ProfileImage;
use crate::profile::{ProfileScanner, ScanOutcome};
use crate::types::Direction;
use crate::volume::OccupancyGrid;
use log::info;
use std::time::Instant;

pub const PROFILE_LABELS: [&str; 3] = ["m", "s", "t"];

/// Frame, scans and report of one pipeline run.
#[derive(Clone, Debug)]
pub struct ProfileResult {
    pub frame: PrincipalFrame,
    /// Primary, secondary, tertiary.
    pub scans: Vec<ScanOutcome>,
    pub report: ProfileReport,
}

impl ProfileResult {
    pub fn profile(&self, rank: usize) -> Option<&ProfileImage> {
        self.scans.get(rank).map(|s| &s.image)
    }

    /// `(label, image)` pairs in rank order.
    pub fn labelled_profiles(&self) -> impl Iterator<Item = (&'static str, &ProfileImage)> {
        PROFILE_LABELS
            .into_iter()
            .zip(self.scans.iter().map(|s| &s.image))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProfilePipeline {
    params: PipelineParams,
}

impl ProfilePipeline {
    pub fn new(params: PipelineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn run(&self, grid: &OccupancyGrid) -> Result<ProfileResult> {
        let t0 = Instant::now();
        let mut timings = TimingBreakdown::default();

        let (frame, axes_ms) = timings.measure("axes", || extract_principal_frame(grid));
        info!(
            "principal axes done in {:.3} ms ({} occupied voxels)",
            axes_ms, frame.occupied
        );
        let dirs = frame.directions().ok_or(ProfileError::DegenerateFrame)?;

        let budgets = self.budgets(grid, &dirs);
        let padding = match self.params.padding {
            Some(p) => p,
            None => {
                let widest = budgets.iter().copied().max().unwrap_or(0);
                u32::try_from(widest).map_err(|_| {
                    ProfileError::InvalidParams(format!(
                        "scan budget {widest} is too large to pad the volume"
                    ))
                })?
            }
        };
        let padded;
        let scan_grid = if padding > 0 {
            padded = grid.padded(padding)?;
            &padded
        } else {
            grid
        };

        let scanner = ProfileScanner::new(self.params.scan_params());
        let (scans, scans_ms) = timings.measure("scans", || {
            scanner.scan_frame_with_budgets(scan_grid, &frame, self.params.orientation, budgets)
        });
        let scans = scans?;
        info!(
            "profile scans done in {:.3} ms (budgets {:?}, padding {})",
            scans_ms, budgets, padding
        );

        let stages: Vec<ScanStage> = PROFILE_LABELS
            .iter()
            .zip(&scans)
            .map(|(label, scan)| {
                timings.push(format!("scan_{label}"), scan.elapsed_ms);
                ScanStage::from_outcome(*label, scan, scan.elapsed_ms)
            })
            .collect();
        timings.total_ms = elapsed_ms(t0);

        let domain = scan_grid.domain();
        let scan_params = scanner.params();
        let report = ProfileReport {
            input: InputDescriptor {
                domain_lower: domain.lower().coords.into(),
                domain_upper: domain.upper().coords.into(),
                padding,
                image_width: scan_params.image_width,
                image_height: scan_params.image_height,
                scan_width: scan_params.width,
            },
            axes: AxesStage::from_frame(&frame, axes_ms),
            scans: stages,
            timings,
        };
        Ok(ProfileResult {
            frame,
            scans,
            report,
        })
    }

    /// Post-contact budget of each axis scan.
    ///
    /// Extent budgets are at least 1: a zero budget starts the plane on the
    /// domain centre and would step past a solid that is flat along the axis.
    pub fn budgets(&self, grid: &OccupancyGrid, axes: &[Direction; 3]) -> [usize; 3] {
        match self.params.scan_budget {
            ScanBudget::Fixed(n) => [n; 3],
            ScanBudget::Extent => {
                axes.map(|d| estimate_extent(grid, &d).unwrap_or(0).max(1) as usize)
            }
        }
    }

    /// Debug volumes for each axis: the voxel plane through the domain centre
    /// perpendicular to the axis (`plane_<label>`) and the profile's hit
    /// pixels placed on that plane (`profile_<label>`). Volumes use the
    /// padded domain the scans ran on.
    pub fn overlay_volumes(
        &self,
        grid: &OccupancyGrid,
        result: &ProfileResult,
    ) -> Result<Vec<(String, OccupancyGrid)>> {
        let dirs = result
            .frame
            .directions()
            .ok_or(ProfileError::DegenerateFrame)?;
        let domain = grid.domain().padded(result.report.input.padding)?;
        let center = domain.center();
        let scan_params = self.params.scan_params();
        let mut volumes = Vec::with_capacity(6);
        for ((rank, label), scan) in PROFILE_LABELS.iter().enumerate().zip(&result.scans) {
            let normal = dirs[rank];
            volumes.push((format!("plane_{label}"), voxel_plane(&domain, &normal, &center)));

            let embedder = PlaneEmbedder::new(
                domain,
                center,
                normal,
                self.params.orientation.hint(&dirs, rank),
                scan_params.width,
                [scan_params.image_width, scan_params.image_height],
            )?;
            let lifted = OccupancyGrid::from_points(domain, embedder.lift_profile(&scan.image))?;
            volumes.push((format!("profile_{label}"), lifted));
        }
        Ok(volumes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;

    #[test]
    fn empty_grid_is_degenerate() {
        let grid = OccupancyGrid::new(crate::volume::Domain3::centered_cube(3));
        let err = ProfilePipeline::default().run(&grid).map(|_| ());
        assert_eq!(err, Err(ProfileError::DegenerateFrame));
    }

    #[test]
    fn budget_beyond_grid_range_is_rejected() {
        let grid = shapes::cuboid([3, 2, 1], 0).expect("shape");
        let pipeline = ProfilePipeline::new(PipelineParams {
            scan_budget: ScanBudget::Fixed(i32::MAX as usize + 1),
            ..Default::default()
        });
        assert!(matches!(
            pipeline.run(&grid),
            Err(ProfileError::InvalidParams(_))
        ));
    }

    #[test]
    fn extent_budget_follows_axis_lengths() {
        let grid = shapes::cuboid([6, 3, 1], 0).expect("shape");
        let pipeline = ProfilePipeline::new(PipelineParams {
            scan_budget: ScanBudget::Extent,
            ..Default::default()
        });
        let axes = [Direction::x_axis(), Direction::y_axis(), Direction::z_axis()];
        assert_eq!(pipeline.budgets(&grid, &axes), [12, 6, 2]);
    }

    #[test]
    fn overlay_volumes_lift_profiles_onto_center_planes() {
        let grid = shapes::cuboid([5, 2, 1], 4).expect("shape");
        let pipeline = ProfilePipeline::new(PipelineParams {
            image_size: 20,
            scan_budget: ScanBudget::Fixed(4),
            padding: Some(0),
            ..Default::default()
        });
        let result = pipeline.run(&grid).expect("pipeline");
        let volumes = pipeline.overlay_volumes(&grid, &result).expect("overlays");
        let names: Vec<_> = volumes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["plane_m", "profile_m", "plane_s", "profile_s", "plane_t", "profile_t"]
        );
        // primary is x: the profile is the 5x3 y/z face of the box
        let (_, profile_m) = &volumes[1];
        assert_eq!(profile_m.occupied_count(), 5 * 3);
        assert!(profile_m.occupied_points().all(|p| p.x == 0));
    }
}
