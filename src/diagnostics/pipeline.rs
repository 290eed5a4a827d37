use crate::diagnostics::{AxesStage, ScanStage, TimingBreakdown};
use serde::Serialize;

/// Report produced by [`ProfilePipeline::run`](crate::ProfilePipeline::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub input: InputDescriptor,
    pub axes: AxesStage,
    pub scans: Vec<ScanStage>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub domain_lower: [i32; 3],
    pub domain_upper: [i32; 3],
    pub padding: u32,
    pub image_width: usize,
    pub image_height: usize,
    pub scan_width: f64,
}
