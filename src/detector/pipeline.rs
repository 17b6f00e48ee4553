use super::params::DetectorParams;
use super::result::{CircleAccumulator, DetectionResult};
use super::timing::TimingBreakdown;
use crate::contour::{edges_closure, freeman_encoding, trace_edges};
use crate::edges::{color_map, directional_kernels, image_gradients, local_extremum, slope, Grad};
use crate::error::{invariant, Result};
use crate::hough::{
    circle_accumulator_fixed, circle_accumulator_free, extract_circles_fixed,
    extract_circles_free, limit_segment, segment_accumulator, segment_threshold,
    segments_from_accumulator,
};
use crate::image::{ColorGrid, GridF32, GridU8};
use crate::threshold::{run_threshold, suppress_isolated_points, ThresholdOutcome};
use log::debug;
use std::time::Instant;

/// Contour detector running the gradient → threshold → NMS chain and the
/// optional tracing and Hough stages on a grayscale image.
pub struct ContourDetector {
    params: DetectorParams,
}

struct SegmentStage {
    accumulator: GridU8,
    votes: u8,
    lines: GridU8,
}

struct CircleStage {
    accumulator: CircleAccumulator,
    circles: GridU8,
}

impl ContourDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DetectorParams) {
        self.params = params;
    }

    /// Run every enabled stage on `image` (values 0–255).
    pub fn process(&self, image: &GridF32) -> Result<DetectionResult> {
        let total_start = Instant::now();
        self.params.validate()?;
        if image.is_empty() {
            return Err(invariant("input image is empty"));
        }
        let p = &self.params;
        let mut timings = TimingBreakdown::default();

        let kernels = directional_kernels(p.kernel, p.directions, p.custom_kernel.as_ref())?;
        let Grad { components, module } =
            timings.time("gradient", || image_gradients(image, &kernels, p.norm))?;

        if !p.use_threshold {
            let (slope, color) =
                timings.time("slope", || slope_and_color(&components, &module))?;
            timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
            return Ok(DetectionResult {
                components,
                module,
                thresholded: None,
                thresholds: Default::default(),
                slope,
                color,
                extrema: None,
                edges: Vec::new(),
                edge_image: None,
                closed_edge_image: None,
                segment_accumulator: None,
                segment_votes: None,
                segments: None,
                circle_accumulator: None,
                circles: None,
                timings,
            });
        }

        let ThresholdOutcome {
            module: mut thresholded,
            values: thresholds,
        } = timings.time("threshold", || run_threshold(&module, &p.threshold))?;
        if let Some(n) = p.isolated_point_radius {
            timings.time("isolated_points", || {
                suppress_isolated_points(&mut thresholded, n)
            });
        }
        debug!(
            "ContourDetector::process thresholds={:?} kept={}",
            thresholds,
            thresholded.count_nonzero()
        );

        let (slope, color) =
            timings.time("slope", || slope_and_color(&components, &thresholded))?;

        let extrema = if p.use_nms {
            Some(timings.time("local_extrema", || local_extremum(&slope, &thresholded))?)
        } else {
            None
        };
        // Tracing and voting run on the thinnest map available.
        let binary = extrema.as_ref().unwrap_or(&thresholded);

        let segments = if p.segments.enabled {
            Some(timings.time("hough_segments", || {
                self.detect_segments(binary, &thresholded)
            })?)
        } else {
            None
        };

        let circles = if p.circles.enabled {
            Some(timings.time("hough_circles", || self.detect_circles(binary))?)
        } else {
            None
        };

        let mut edges = Vec::new();
        let mut edge_image = None;
        let mut closed_edge_image = None;
        if p.edges.enabled {
            edges = timings.time("edge_extraction", || freeman_encoding(binary));
            debug!("ContourDetector::process extracted {} edges", edges.len());
            edge_image = Some(trace_edges(&edges, image.rows, image.cols));

            if p.edges.closure {
                timings.time("edge_closure", || {
                    edges_closure(&mut edges, binary, &slope, p.edges.closure_iterations)
                })?;
                closed_edge_image = Some(trace_edges(&edges, image.rows, image.cols));
            }
        }

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        let (segment_accumulator, segment_votes, segments) = match segments {
            Some(s) => (Some(s.accumulator), Some(s.votes), Some(s.lines)),
            None => (None, None, None),
        };
        let (circle_accumulator, circles) = match circles {
            Some(c) => (Some(c.accumulator), Some(c.circles)),
            None => (None, None),
        };

        Ok(DetectionResult {
            components,
            module,
            thresholded: Some(thresholded),
            thresholds,
            slope,
            color,
            extrema,
            edges,
            edge_image,
            closed_edge_image,
            segment_accumulator,
            segment_votes,
            segments,
            circle_accumulator,
            circles,
            timings,
        })
    }

    fn detect_segments(&self, binary: &GridF32, shape: &GridF32) -> Result<SegmentStage> {
        let sp = &self.params.segments;
        let accumulator = segment_accumulator(binary)?;
        // A zero level would draw every empty cell.
        let votes = if sp.auto_threshold {
            segment_threshold(&accumulator).max(1)
        } else {
            sp.min_votes
        };
        let mut lines = segments_from_accumulator(&accumulator, binary.rows, binary.cols, votes);
        if sp.limit_to_shape {
            limit_segment(&mut lines, shape)?;
        }
        Ok(SegmentStage {
            accumulator,
            votes,
            lines,
        })
    }

    fn detect_circles(&self, binary: &GridF32) -> Result<CircleStage> {
        let cp = &self.params.circles;
        let (rows, cols) = (binary.rows, binary.cols);
        if cp.fixed_radius {
            let acc = circle_accumulator_fixed(binary, cp.radius)?;
            let circles = extract_circles_fixed(&acc, cp.radius, cp.vote_criteria, rows, cols);
            Ok(CircleStage {
                accumulator: CircleAccumulator::Fixed(acc),
                circles,
            })
        } else {
            let acc = circle_accumulator_free(binary)?;
            let circles = extract_circles_free(&acc, cp.vote_criteria, rows, cols);
            Ok(CircleStage {
                accumulator: CircleAccumulator::Free(acc),
                circles,
            })
        }
    }
}

fn slope_and_color(components: &[GridF32], module: &GridF32) -> Result<(GridF32, ColorGrid)> {
    let slope = slope(components, module)?;
    let color = color_map(&slope, module)?;
    Ok((slope, color))
}
