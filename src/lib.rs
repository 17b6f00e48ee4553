//! Classical contour detection on grayscale rasters.
//!
//! The crate chains directional gradient estimation, module thresholding,
//! non-maximum suppression, Freeman chain-code tracing with gap closing, and
//! Hough voting for line segments and circles. Every stage works on an owned
//! [`image::Grid`] and is usable on its own; [`ContourDetector`] sequences
//! them with per-stage timings.

// Core stages
pub mod contour;
pub mod edges;
pub mod hough;
pub mod image;
pub mod threshold;

// Orchestration and outer layers
pub mod config;
pub mod detector;
pub mod error;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{ContourDetector, DetectionResult, DetectionSummary, DetectorParams};
pub use crate::error::{DetectError, Result};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use contour_detector::prelude::*;
///
/// # fn main() -> contour_detector::Result<()> {
/// let mut gray = GridF32::new(64, 64);
/// for x in 16..48 {
///     for y in 16..48 {
///         gray.set(x, y, 200.0);
///     }
/// }
///
/// let det = ContourDetector::new(DetectorParams::default());
/// let res = det.process(&gray)?;
/// println!("extrema={:?} latency_ms={:.3}", res.summary().extrema_pixels, res.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::contour::Edge;
    pub use crate::image::{GridF32, GridU8};
    pub use crate::{ContourDetector, DetectError, DetectionResult, DetectorParams};
}
