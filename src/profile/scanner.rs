use super::params::{FrameOrientation, ScanParams};
use crate::axes::PrincipalFrame;
use crate::diagnostics::timing::elapsed_ms;
use crate::embed::PlaneEmbedder;
use crate::error::{ProfileError, Result};
use crate::geometry::move_along;
use crate::image::ProfileImage;
use crate::types::Direction;
use crate::volume::OccupancyGrid;
use log::{debug, warn};
use std::time::Instant;

/// Result of one scan with its step statistics.
#[derive(Clone, Debug)]
pub struct ScanOutcome {
    pub image: ProfileImage,
    pub normal: Direction,
    pub scan_budget: usize,
    /// Plane advances performed.
    pub steps: usize,
    /// Step at which the first hit occurred (1-based).
    pub contact_step: usize,
    /// True when the step ceiling cut the post-contact window short.
    pub truncated: bool,
    pub elapsed_ms: f64,
}

impl ScanOutcome {
    pub fn hit_pixels(&self) -> usize {
        self.image.hit_count()
    }
}

/// Per-scan mutable state: the plane cursor and the step counters.
struct ScanState {
    cursor: PlaneEmbedder,
    steps: usize,
    post_contact: usize,
    contact_step: Option<usize>,
}

impl ScanState {
    fn first_found(&self) -> bool {
        self.contact_step.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProfileScanner {
    params: ScanParams,
}

impl ProfileScanner {
    pub fn new(params: ScanParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Silhouette of the occupied voxels seen along `normal`.
    pub fn scan(
        &self,
        grid: &OccupancyGrid,
        normal: &Direction,
        secondary: Option<&Direction>,
    ) -> Result<ProfileImage> {
        self.scan_detailed(grid, normal, secondary).map(|o| o.image)
    }

    pub fn scan_detailed(
        &self,
        grid: &OccupancyGrid,
        normal: &Direction,
        secondary: Option<&Direction>,
    ) -> Result<ScanOutcome> {
        self.scan_observed(grid, normal, secondary, |_, _| {})
    }

    /// Like [`ProfileScanner::scan_detailed`], calling `observer(step, raster)`
    /// after every plane advance.
    pub fn scan_observed<F>(
        &self,
        grid: &OccupancyGrid,
        normal: &Direction,
        secondary: Option<&Direction>,
        mut observer: F,
    ) -> Result<ScanOutcome>
    where
        F: FnMut(usize, &ProfileImage),
    {
        let t0 = Instant::now();
        let params = &self.params;
        params.validate()?;
        let (w, h) = (params.image_width, params.image_height);
        let domain = *grid.domain();
        let budget = params.scan_budget;
        let ceiling = params.step_ceiling(&domain);

        let start = move_along(&domain.center(), &-*normal, budget as f64);
        let cursor = PlaneEmbedder::new(
            domain,
            start,
            *normal,
            secondary.copied(),
            params.width,
            [w, h],
        )?;
        let (u, v) = cursor.basis();
        debug!(
            "profile scan: start {:?}, u {:.3?}, v {:.3?}, scale {:.3}",
            cursor.origin().coords.as_slice(),
            u.as_vector().as_slice(),
            v.as_vector().as_slice(),
            cursor.pixel_scale()
        );
        let mut state = ScanState {
            cursor,
            steps: 0,
            post_contact: 0,
            contact_step: None,
        };

        let mut image = ProfileImage::new(w, h);
        let mut pending: Vec<[usize; 2]> = (0..h)
            .flat_map(|y| (0..w).map(move |x| [x, y]))
            .collect();
        let step = *normal.as_vector();

        let mut truncated = false;
        loop {
            if state.steps >= ceiling {
                if !state.first_found() {
                    debug!(
                        "profile scan: no contact along ({:.3}, {:.3}, {:.3}) after {} steps",
                        step.x, step.y, step.z, state.steps
                    );
                    return Err(ProfileError::NoSurfaceFound { steps: state.steps });
                }
                warn!(
                    "profile scan: step ceiling {} reached {} steps after contact (budget {})",
                    ceiling, state.post_contact, budget
                );
                truncated = true;
                break;
            }

            state.cursor.shift_origin(&step);
            state.steps += 1;

            let cursor = &state.cursor;
            let before = pending.len();
            pending.retain(|&[x, y]| {
                if cursor.sample(grid, [x, y]) {
                    image.mark_hit(x, y);
                    false
                } else {
                    true
                }
            });
            if pending.len() < before && !state.first_found() {
                state.contact_step = Some(state.steps);
            }
            if state.first_found() {
                state.post_contact += 1;
            }
            observer(state.steps, &image);

            if state.first_found() && state.post_contact >= budget {
                break;
            }
        }

        let contact_step = state.contact_step.unwrap_or(state.steps);
        debug!(
            "profile scan: contact at step {}, stopped after {} steps, {} hit pixels",
            contact_step,
            state.steps,
            image.hit_count()
        );
        Ok(ScanOutcome {
            image,
            normal: *normal,
            scan_budget: budget,
            steps: state.steps,
            contact_step,
            truncated,
            elapsed_ms: elapsed_ms(t0),
        })
    }

    /// Scan the three axes of `frame`, primary first.
    ///
    /// With the `parallel` feature the scans run concurrently; the grid is
    /// only read and each scan owns its cursor and raster.
    pub fn scan_frame(
        &self,
        grid: &OccupancyGrid,
        frame: &PrincipalFrame,
        orientation: FrameOrientation,
    ) -> Result<Vec<ScanOutcome>> {
        let budgets = [self.params.scan_budget; 3];
        self.scan_frame_with_budgets(grid, frame, orientation, budgets)
    }

    /// Scan the three axes of `frame` with one scan budget per axis.
    pub fn scan_frame_with_budgets(
        &self,
        grid: &OccupancyGrid,
        frame: &PrincipalFrame,
        orientation: FrameOrientation,
        budgets: [usize; 3],
    ) -> Result<Vec<ScanOutcome>> {
        let dirs = frame.directions().ok_or(ProfileError::DegenerateFrame)?;
        let jobs: Vec<(Direction, Option<Direction>, usize)> = (0..3)
            .map(|rank| (dirs[rank], orientation.hint(&dirs, rank), budgets[rank]))
            .collect();

        let run = |(normal, hint, budget): &(Direction, Option<Direction>, usize)| {
            let scanner = ProfileScanner::new(self.params.clone().with_budget(*budget));
            scanner.scan_detailed(grid, normal, hint.as_ref())
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            jobs.par_iter().map(run).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            jobs.iter().map(run).collect()
        }
    }
}
