//! Parameter types configuring the detector stages.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON config only
//! needs the fields it changes. Defaults enable the gradient, hysteresis and
//! non-maximum suppression stages; tracing and the Hough stages are opt-in.

use crate::edges::{DirectionMode, Kernel3, KernelFamily, NormType};
use crate::error::{DetectError, Result};
use crate::threshold::ThresholdParams;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Kernel family used for the directional derivatives.
    pub kernel: KernelFamily,
    /// Weights of the primary kernel when `kernel` is `custom`.
    pub custom_kernel: Option<Kernel3>,
    /// Two or four gradient directions.
    pub directions: DirectionMode,
    /// Norm combining the directional components into the module.
    pub norm: NormType,
    /// Threshold the module; every later stage depends on this.
    pub use_threshold: bool,
    pub threshold: ThresholdParams,
    /// Clear thresholded cells with too few nonzero neighbours. `Some(n)` uses
    /// a `(2n+1)²` window.
    pub isolated_point_radius: Option<usize>,
    /// Thin the thresholded module along the gradient direction.
    pub use_nms: bool,
    pub edges: EdgeParams,
    pub segments: SegmentParams,
    pub circles: CircleParams,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            kernel: KernelFamily::default(),
            custom_kernel: None,
            directions: DirectionMode::default(),
            norm: NormType::default(),
            use_threshold: true,
            threshold: ThresholdParams::default(),
            isolated_point_radius: None,
            use_nms: true,
            edges: EdgeParams::default(),
            segments: SegmentParams::default(),
            circles: CircleParams::default(),
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<()> {
        if self.kernel == KernelFamily::Custom && self.custom_kernel.is_none() {
            return Err(DetectError::Config(
                "kernel is `custom` but `custom_kernel` is missing".into(),
            ));
        }
        self.threshold.validate()?;
        self.circles.validate()
    }
}

/// Freeman tracing and gap closing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub enabled: bool,
    pub closure: bool,
    pub closure_iterations: usize,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            enabled: false,
            closure: false,
            closure_iterations: 5,
        }
    }
}

/// Line-segment Hough stage.
///
/// With `auto_threshold` the vote level comes from the accumulator itself
/// (the smallest of its six strongest distinct values); otherwise
/// `min_votes` is used as is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    pub enabled: bool,
    pub auto_threshold: bool,
    pub min_votes: u8,
    /// Trim lines to the extent of the thresholded shape.
    pub limit_to_shape: bool,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            enabled: false,
            auto_threshold: true,
            min_votes: 2,
            limit_to_shape: true,
        }
    }
}

/// Circle Hough stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    pub enabled: bool,
    /// Search a single radius (2D accumulator) instead of all radii (3D).
    pub fixed_radius: bool,
    pub radius: f32,
    pub vote_criteria: u8,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            enabled: false,
            fixed_radius: true,
            radius: 2.0,
            vote_criteria: 1,
        }
    }
}

impl CircleParams {
    fn validate(&self) -> Result<()> {
        if self.fixed_radius && !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(DetectError::Config(format!(
                "circle radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}
