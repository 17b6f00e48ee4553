//! Contour detector sequencing the edge-detection stages.
//!
//! Stages, in order:
//! - Gradient: one convolution per direction (2 or 4) with the selected kernel
//!   family, combined into a normalized module (L∞ or L1).
//! - Threshold: global, local or hysteresis strategy on the module. When
//!   disabled, only the slope and color map of the raw module are produced.
//! - Slope: gradient direction and its color coding, masked by the
//!   thresholded module.
//! - Local extrema: non-maximum suppression along the gradient direction.
//! - Hough segments / circles: voting on the thinned map.
//! - Edge extraction: Freeman tracing, optionally followed by gap closing.
//!
//! Each stage is timed; see [`DetectionResult::summary`].

mod params;
mod pipeline;
mod result;
mod timing;

pub use params::{CircleParams, DetectorParams, EdgeParams, SegmentParams};
pub use pipeline::ContourDetector;
pub use result::{CircleAccumulator, DetectionResult, DetectionSummary};
pub use timing::{StageTiming, TimingBreakdown};
