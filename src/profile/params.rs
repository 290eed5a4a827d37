use crate::error::{ProfileError, Result};
use crate::types::Direction;
use crate::volume::Domain3;
use serde::Deserialize;

/// Parameters of a single profile scan.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Grid units spanned by the image width.
    pub width: f64,
    pub image_width: usize,
    pub image_height: usize,
    /// Steps taken after the first contact before the scan stops.
    pub scan_budget: usize,
    /// Absolute step ceiling. `None` derives it from the domain, see
    /// [`ScanParams::step_ceiling`].
    pub max_steps: Option<usize>,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            image_width: 100,
            image_height: 100,
            scan_budget: 50,
            max_steps: None,
        }
    }
}

impl ScanParams {
    /// Square image of `size` pixels spanning `size` grid units.
    pub fn square(size: usize, scan_budget: usize) -> Self {
        Self {
            width: size as f64,
            image_width: size,
            image_height: size,
            scan_budget,
            max_steps: None,
        }
    }

    pub fn with_budget(mut self, scan_budget: usize) -> Self {
        self.scan_budget = scan_budget;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ProfileError::InvalidParams(format!(
                "scan width must be positive, got {}",
                self.width
            )));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ProfileError::InvalidParams(format!(
                "image size must be non-empty, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        Ok(())
    }

    /// Step ceiling for a scan over `domain`.
    ///
    /// By default `2·scan_budget + ceil(diagonal) + 2`: the plane starts
    /// `scan_budget` units behind the centre, has crossed the whole domain
    /// after `scan_budget + diagonal/2` steps, and then still needs its
    /// post-contact budget.
    pub fn step_ceiling(&self, domain: &Domain3) -> usize {
        self.max_steps.unwrap_or_else(|| {
            self.scan_budget
                .saturating_mul(2)
                .saturating_add(domain.diagonal_length().ceil() as usize + 2)
        })
    }
}

/// In-plane orientation used when scanning the three axes of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrientation {
    /// Derive each image's horizontal axis from the global axis least
    /// parallel to the scan normal.
    #[default]
    Implicit,
    /// Use the highest-ranked other frame axis as the horizontal axis, so the
    /// images are aligned with the solid rather than with the grid.
    FrameAligned,
}

impl FrameOrientation {
    /// Horizontal image axis for the scan along `axes[rank]`.
    pub fn hint(&self, axes: &[Direction; 3], rank: usize) -> Option<Direction> {
        match self {
            FrameOrientation::Implicit => None,
            FrameOrientation::FrameAligned => Some(axes[if rank == 0 { 1 } else { 0 }]),
        }
    }
}
