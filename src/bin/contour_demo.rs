use contour_detector::config::{load_config, OutputConfig};
use contour_detector::detector::{ContourDetector, DetectionResult};
use contour_detector::edges::normalized;
use contour_detector::image::io::{
    load_grayscale_image, save_color_grid, save_grid_f32, save_grid_u8, write_json_file,
};
use contour_detector::image::{GridF32, GridU8};
use contour_detector::threshold::to_binary;
use contour_detector::{DetectError, Result};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let detector = ContourDetector::new(config.params);
    let result = detector.process(&gray)?;

    let saved = save_outputs(&result, &config.output)?;
    let summary = result.summary();
    if let Some(path) = &config.output.summary_json {
        write_json_file(path, &summary)?;
        println!("Saved summary to {}", path.display());
    }

    println!(
        "{}x{} image, {} edges, total {:.3} ms",
        summary.cols, summary.rows, summary.edge_count, summary.timings.total_ms
    );
    for stage in &summary.timings.stages {
        println!("  {:<16} {:>9.3} ms", stage.label, stage.elapsed_ms);
    }
    for path in saved {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn save_float(grid: &GridF32, path: &Path, binary: bool) -> Result<()> {
    if binary {
        save_grid_u8(&to_binary(grid), path)
    } else {
        save_grid_f32(grid, path)
    }
}

fn save_mask(grid: &GridU8, path: &Path, binary: bool) -> Result<()> {
    if binary {
        save_grid_u8(&grid.map(|v| if v > 0 { 255 } else { 0 }), path)
    } else {
        save_grid_u8(grid, path)
    }
}

fn save_outputs(result: &DetectionResult, out: &OutputConfig) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::new();
    let floats: [(Option<&GridF32>, &Option<PathBuf>); 3] = [
        (Some(&result.module), &out.module),
        (result.thresholded.as_ref(), &out.threshold),
        (result.extrema.as_ref(), &out.extrema),
    ];
    for (grid, path) in floats {
        if let (Some(grid), Some(path)) = (grid, path) {
            save_float(grid, path, out.binary)?;
            saved.push(path.clone());
        }
    }

    for (i, component) in result.components.iter().enumerate() {
        if let Some(path) = out.component_path(i) {
            save_grid_f32(&normalized(component), &path)?;
            saved.push(path);
        }
    }

    if let Some(path) = &out.slope_color {
        save_color_grid(&result.color, path)?;
        saved.push(path.clone());
    }

    let circle_projection = result.circle_accumulator.as_ref().map(|acc| acc.projection());
    let masks: [(Option<&GridU8>, &Option<PathBuf>); 6] = [
        (result.edge_image.as_ref(), &out.edges),
        (result.closed_edge_image.as_ref(), &out.closed_edges),
        (result.segment_accumulator.as_ref(), &out.segment_accumulator),
        (result.segments.as_ref(), &out.segments),
        (circle_projection.as_ref(), &out.circle_accumulator),
        (result.circles.as_ref(), &out.circles),
    ];
    for (grid, path) in masks {
        if let (Some(grid), Some(path)) = (grid, path) {
            save_mask(grid, path, out.binary)?;
            saved.push(path.clone());
        }
    }
    Ok(saved)
}

fn usage() -> DetectError {
    DetectError::Config("Usage: contour_demo <config.json>".to_string())
}
