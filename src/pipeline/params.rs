//! Parameters of the end-to-end profile pipeline.
//!
//! Defaults: 100×100 images spanning 100 grid units and a fixed post-contact
//! budget of 50 steps, with the volume padded by the largest budget so every
//! scan starts inside the domain.

use crate::profile::{FrameOrientation, ScanParams};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Square image side in pixels.
    pub image_size: usize,
    /// Grid units spanned by the image width; `None` uses `image_size`.
    pub scan_width: Option<f64>,
    pub scan_budget: ScanBudget,
    /// Voxels added on every side before scanning; `None` pads by the
    /// largest per-axis budget.
    pub padding: Option<u32>,
    pub max_steps: Option<usize>,
    pub orientation: FrameOrientation,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            image_size: 100,
            scan_width: None,
            scan_budget: ScanBudget::Fixed(50),
            padding: None,
            max_steps: None,
            orientation: FrameOrientation::Implicit,
        }
    }
}

impl PipelineParams {
    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            width: self.scan_width.unwrap_or(self.image_size as f64),
            image_width: self.image_size,
            image_height: self.image_size,
            scan_budget: 0,
            max_steps: self.max_steps,
        }
    }
}

/// How many post-contact steps each axis scan takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanBudget {
    /// Same budget for every axis.
    Fixed(usize),
    /// The solid's extent along the scanned axis, so the sweep covers its
    /// whole depth.
    Extent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_variants_deserialize() {
        let p: PipelineParams =
            serde_json::from_str(r#"{ "scan_budget": { "fixed": 7 }, "image_size": 32 }"#).unwrap();
        assert_eq!(p.scan_budget, ScanBudget::Fixed(7));
        assert_eq!(p.scan_params().width, 32.0);

        let p: PipelineParams = serde_json::from_str(r#"{ "scan_budget": "extent" }"#).unwrap();
        assert_eq!(p.scan_budget, ScanBudget::Extent);
        assert_eq!(p.image_size, 100);
    }
}
