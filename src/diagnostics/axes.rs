use crate::axes::PrincipalFrame;
use serde::Serialize;

/// Outcome of the principal-axis stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxesStage {
    pub elapsed_ms: f64,
    pub occupied: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<[f64; 3]>,
    /// Primary, secondary, tertiary.
    pub axes: [[f64; 3]; 3],
    pub eigenvalues: [f64; 3],
    pub degenerate: bool,
}

impl AxesStage {
    pub fn from_frame(frame: &PrincipalFrame, elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            occupied: frame.occupied,
            centroid: frame.centroid.map(|c| [c.x, c.y, c.z]),
            axes: frame.axes.map(|a| [a.x, a.y, a.z]),
            eigenvalues: frame.eigenvalues,
            degenerate: frame.is_degenerate(),
        }
    }
}
