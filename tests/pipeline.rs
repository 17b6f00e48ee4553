mod common;

use common::synthetic_image::{graded_squares, squares_image, Square};
use contour_detector::detector::{EdgeParams, SegmentParams};
use contour_detector::edges::{DirectionMode, KernelFamily, NormType};
use contour_detector::image::GridF32;
use contour_detector::threshold::{ThresholdMethod, ThresholdParams};
use contour_detector::{ContourDetector, DetectError, DetectorParams};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn edges_stay_on_the_square_outlines() {
    init_logger();
    let (image, squares) = graded_squares();
    let detector = ContourDetector::new(DetectorParams {
        edges: EdgeParams {
            enabled: true,
            closure: true,
            closure_iterations: 5,
        },
        ..Default::default()
    });
    let result = detector.process(&image).expect("detector run");

    assert_eq!(result.components.len(), 2);
    let high = result.thresholds.hysteresis_high.expect("high threshold");
    let low = result.thresholds.hysteresis_low.expect("low threshold");
    assert!(high > low, "high={high} low={low}");

    let thresholded = result.thresholded.as_ref().expect("thresholded module");
    let extrema = result.extrema.as_ref().expect("local extrema");
    assert!(extrema.count_nonzero() > 0);
    assert!(extrema.count_nonzero() <= thresholded.count_nonzero());
    for x in 0..image.rows {
        for y in 0..image.cols {
            if thresholded.get(x, y) != 0.0 {
                assert!(
                    squares.iter().any(|sq| sq.near_outline(x, y)),
                    "response away from every outline at ({x},{y})"
                );
            }
        }
    }

    assert!(!result.edges.is_empty());
    let edge_image = result.edge_image.as_ref().expect("edge image");
    let closed = result.closed_edge_image.as_ref().expect("closed edge image");
    for (i, (&open, &shut)) in edge_image.data.iter().zip(&closed.data).enumerate() {
        assert!(open == 0 || shut != 0, "closure dropped pixel {i}");
    }

    let labels: Vec<&str> = result
        .timings
        .stages
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        labels,
        ["gradient", "threshold", "slope", "local_extrema", "edge_extraction", "edge_closure"]
    );
    assert!(result.timings.total_ms >= 0.0);
}

#[test]
fn without_threshold_only_gradient_outputs_are_produced() {
    init_logger();
    let square = Square { top: 16, left: 16, side: 16, value: 220.0 };
    let image = squares_image(48, 48, 32.0, &[square]);
    let detector = ContourDetector::new(DetectorParams {
        use_threshold: false,
        edges: EdgeParams {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    });
    let result = detector.process(&image).unwrap();

    assert!(result.thresholded.is_none());
    assert!(result.extrema.is_none());
    assert!(result.edges.is_empty());
    assert!(result.edge_image.is_none());
    assert!(result.module.count_nonzero() > 0);
    assert!(result.slope.count_nonzero() > 0);
    assert_eq!((result.color.rows, result.color.cols), (48, 48));
}

#[test]
fn custom_sobel_weights_match_the_builtin_family() {
    let (image, _) = graded_squares();
    let builtin = ContourDetector::new(DetectorParams::default())
        .process(&image)
        .unwrap();
    let custom = ContourDetector::new(DetectorParams {
        kernel: KernelFamily::Custom,
        custom_kernel: Some([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]),
        ..Default::default()
    })
    .process(&image)
    .unwrap();

    assert_eq!(builtin.module, custom.module);
    assert_eq!(builtin.extrema, custom.extrema);
}

#[test]
fn four_directions_with_l1_norm() {
    let square = Square { top: 8, left: 8, side: 20, value: 200.0 };
    let image = squares_image(40, 40, 10.0, &[square]);
    let result = ContourDetector::new(DetectorParams {
        kernel: KernelFamily::Kirsch,
        directions: DirectionMode::Multidirectional,
        norm: NormType::L1,
        threshold: ThresholdParams {
            method: ThresholdMethod::Global,
            ..Default::default()
        },
        ..Default::default()
    })
    .process(&image)
    .unwrap();

    assert_eq!(result.components.len(), 4);
    assert!(result.thresholds.global.is_some());
    assert!(result.thresholds.hysteresis_high.is_none());
    let max = result.module.data.iter().copied().fold(0.0f32, f32::max);
    assert!((max - 255.0).abs() < 1e-3);
}

#[test]
fn limited_segments_stay_inside_the_shape() {
    init_logger();
    let (image, _) = graded_squares();
    let result = ContourDetector::new(DetectorParams {
        segments: SegmentParams {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .process(&image)
    .unwrap();

    let votes = result.segment_votes.expect("segment vote level");
    assert!(votes >= 1);
    let thresholded = result.thresholded.as_ref().unwrap();
    let segments = result.segments.as_ref().unwrap();

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (usize::MAX, 0, usize::MAX, 0);
    for x in 0..image.rows {
        for y in 0..image.cols {
            if thresholded.get(x, y) != 0.0 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }
    for x in 0..image.rows {
        for y in 0..image.cols {
            if segments.get(x, y) != 0 {
                assert!((min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y));
            }
        }
    }
}

#[test]
fn summary_serializes_with_camel_case_keys() {
    let (image, _) = graded_squares();
    let result = ContourDetector::new(DetectorParams::default())
        .process(&image)
        .unwrap();
    let json = serde_json::to_value(result.summary()).unwrap();
    assert_eq!(json["rows"], 48);
    assert_eq!(json["cols"], 168);
    assert_eq!(json["edgeCount"], 0);
    assert!(json["thresholds"]["hysteresisHigh"].is_number());
    assert!(json["timings"]["stages"].is_array());
}

#[test]
fn swapped_hysteresis_percentages_abort_the_run() {
    let (image, _) = graded_squares();
    let err = ContourDetector::new(DetectorParams {
        threshold: ThresholdParams {
            hysteresis_high_percent: 75.0,
            hysteresis_low_percent: 50.0,
            ..Default::default()
        },
        ..Default::default()
    })
    .process(&image)
    .unwrap_err();
    assert!(matches!(err, DetectError::InvariantViolation(_)));
}

#[test]
fn empty_image_is_rejected() {
    let err = ContourDetector::new(DetectorParams::default())
        .process(&GridF32::new(0, 0))
        .unwrap_err();
    assert!(matches!(err, DetectError::InvariantViolation(_)));
}
