use contour_detector::detector::{ContourDetector, DetectorParams, EdgeParams};
use contour_detector::image::GridF32;

fn main() {
    env_logger::init();

    // Synthetic frame: a bright square on a dark background.
    let (rows, cols) = (120usize, 160usize);
    let mut gray = GridF32::new(rows, cols);
    for x in 30..90 {
        for y in 50..110 {
            gray.set(x, y, 200.0);
        }
    }

    let detector = ContourDetector::new(DetectorParams {
        edges: EdgeParams {
            enabled: true,
            closure: true,
            ..Default::default()
        },
        ..Default::default()
    });
    match detector.process(&gray) {
        Ok(res) => {
            let summary = res.summary();
            println!(
                "edges={} extrema_pixels={:?} latency_ms={:.3}",
                summary.edge_count, summary.extrema_pixels, summary.timings.total_ms
            );
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
