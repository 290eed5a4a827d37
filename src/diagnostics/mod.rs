//! Serializable diagnostics returned by the profile pipeline.
//!
//! `ProfileReport` is the entry point: it bundles the input description, the
//! principal-axis stage, one `ScanStage` per scanned axis and a timing
//! breakdown. The demo binary writes it as JSON next to the profile images.

pub mod axes;
pub mod pipeline;
pub mod scan;
pub mod timing;

pub use axes::AxesStage;
pub use pipeline::{InputDescriptor, ProfileReport};
pub use scan::ScanStage;
pub use timing::{StageTiming, TimingBreakdown};
