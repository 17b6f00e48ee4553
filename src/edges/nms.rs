//! Non-maximum suppression along the gradient direction.
//!
//! The direction `|slope|` is cut into π/4 buckets (0..=4, where 0 and 4 both
//! mean horizontal). Each bucket selects the two neighbours lying along the
//! gradient; a pixel survives only if its module is at least as large as both.
//! The outermost 1-pixel frame is copied unchanged.
use crate::error::{invariant, Result};
use crate::image::{GridF32, GridView};
use std::f32::consts::FRAC_PI_4;

/// Offsets `(dx, dy)` of the two comparison neighbours for a bucket.
fn neighbor_offsets(bucket: usize) -> [(isize, isize); 2] {
    match bucket {
        0 | 4 => [(1, 0), (-1, 0)],
        1 => [(1, 1), (-1, -1)],
        2 => [(0, 1), (0, -1)],
        _ => [(-1, 1), (1, -1)],
    }
}

/// Thin `module` by keeping local maxima along `slope`.
pub fn local_extremum(slope: &GridF32, module: &GridF32) -> Result<GridF32> {
    if !slope.same_shape(module) {
        return Err(invariant("slope and module differ in size"));
    }
    let mut out = module.clone();
    let rows = module.rows;
    let cols = module.cols;
    if rows < 3 || cols < 3 {
        return Ok(out);
    }

    for x in 1..rows - 1 {
        let slope_row = slope.row(x);
        for y in 1..cols - 1 {
            let bucket = (slope_row[y].abs() / FRAC_PI_4) as usize;
            if bucket > 4 {
                return Err(invariant(format!(
                    "slope {} at ({x}, {y}) is outside [-pi, pi]",
                    slope_row[y]
                )));
            }
            let value = module.get(x, y);
            let keep = neighbor_offsets(bucket).iter().all(|&(dx, dy)| {
                let nx = (x as isize + dx) as usize;
                let ny = (y as isize + dy) as usize;
                value >= module.get(nx, ny)
            });
            if !keep {
                out.set(x, y, 0.0);
            }
        }
    }

    Ok(out)
}
