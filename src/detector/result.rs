//! Detector outputs: every intermediate grid plus a serializable summary.
use super::timing::TimingBreakdown;
use crate::contour::Edge;
use crate::hough::Accumulator3;
use crate::image::{ColorGrid, GridF32, GridU8};
use crate::threshold::ThresholdValues;
use serde::Serialize;

/// Circle votes, shaped by the radius mode.
#[derive(Clone, Debug)]
pub enum CircleAccumulator {
    Fixed(GridU8),
    Free(Accumulator3),
}

impl CircleAccumulator {
    /// 2D view for display: the votes themselves, or the best vote over all
    /// radii.
    pub fn projection(&self) -> GridU8 {
        match self {
            CircleAccumulator::Fixed(acc) => acc.clone(),
            CircleAccumulator::Free(acc) => acc.max_over_radius(),
        }
    }
}

/// Everything one detector run produced. Stages that were disabled, or that
/// depend on a disabled stage, leave their field empty.
#[derive(Clone, Debug)]
pub struct DetectionResult {
    /// Raw directional derivatives, one per direction.
    pub components: Vec<GridF32>,
    /// Normalized gradient module.
    pub module: GridF32,
    pub thresholded: Option<GridF32>,
    pub thresholds: ThresholdValues,
    /// Gradient direction, zero where the (thresholded) module is zero.
    pub slope: GridF32,
    pub color: ColorGrid,
    /// Module after non-maximum suppression.
    pub extrema: Option<GridF32>,
    pub edges: Vec<Edge>,
    pub edge_image: Option<GridU8>,
    pub closed_edge_image: Option<GridU8>,
    pub segment_accumulator: Option<GridU8>,
    pub segment_votes: Option<u8>,
    pub segments: Option<GridU8>,
    pub circle_accumulator: Option<CircleAccumulator>,
    pub circles: Option<GridU8>,
    pub timings: TimingBreakdown,
}

impl DetectionResult {
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            rows: self.module.rows,
            cols: self.module.cols,
            directions: self.components.len(),
            thresholds: self.thresholds,
            module_pixels: self.thresholded.as_ref().map(GridF32::count_nonzero),
            extrema_pixels: self.extrema.as_ref().map(GridF32::count_nonzero),
            edge_count: self.edges.len(),
            edge_pixels: self.edge_image.as_ref().map(GridU8::count_nonzero),
            closed_edge_pixels: self.closed_edge_image.as_ref().map(GridU8::count_nonzero),
            segment_votes: self.segment_votes,
            segment_pixels: self.segments.as_ref().map(GridU8::count_nonzero),
            circle_pixels: self.circles.as_ref().map(GridU8::count_nonzero),
            timings: self.timings.clone(),
        }
    }
}

/// Counts and threshold values of a run, for logs and JSON reports.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub rows: usize,
    pub cols: usize,
    pub directions: usize,
    pub thresholds: ThresholdValues,
    pub module_pixels: Option<usize>,
    pub extrema_pixels: Option<usize>,
    pub edge_count: usize,
    pub edge_pixels: Option<usize>,
    pub closed_edge_pixels: Option<usize>,
    pub segment_votes: Option<u8>,
    pub segment_pixels: Option<usize>,
    pub circle_pixels: Option<usize>,
    pub timings: TimingBreakdown,
}
