use crate::profile::ScanOutcome;
use serde::Serialize;

/// Summary of one directional scan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStage {
    /// `m`, `s` or `t` for primary, secondary, tertiary.
    pub label: String,
    pub normal: [f64; 3],
    pub scan_budget: usize,
    pub steps: usize,
    pub contact_step: usize,
    pub hit_pixels: usize,
    pub truncated: bool,
    pub elapsed_ms: f64,
}

impl ScanStage {
    pub fn from_outcome(label: impl Into<String>, outcome: &ScanOutcome, elapsed_ms: f64) -> Self {
        let n = outcome.normal.as_vector();
        Self {
            label: label.into(),
            normal: [n.x, n.y, n.z],
            scan_budget: outcome.scan_budget,
            steps: outcome.steps,
            contact_step: outcome.contact_step,
            hit_pixels: outcome.hit_pixels(),
            truncated: outcome.truncated,
            elapsed_ms,
        }
    }
}
