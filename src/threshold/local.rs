use crate::error::{DetectError, Result};
use crate::image::GridF32;

/// Zero every interior cell lying below the mean of its
/// `(2·window+1)²` neighbourhood.
///
/// Neighbours outside `[1, rows-1] × [1, cols-1]` are skipped, but the divisor
/// stays the full window area, so cells near the border compare against a
/// lowered mean.
pub fn local_threshold(src: &GridF32, window: usize) -> Result<GridF32> {
    if window == 0 {
        return Err(DetectError::Config(
            "local threshold window must be positive".into(),
        ));
    }
    let mut out = src.clone();
    let rows = src.rows as isize;
    let cols = src.cols as isize;
    if rows < 3 || cols < 3 {
        return Ok(out);
    }
    let w = window as isize;
    let area = ((2 * w + 1) * (2 * w + 1)) as f32;

    for x in 1..rows - 1 {
        for y in 1..cols - 1 {
            let mut sum = 0.0f32;
            for i in -w..=w {
                let xi = x + i;
                if xi < 1 || xi > rows - 1 {
                    continue;
                }
                for j in -w..=w {
                    let yj = y + j;
                    if yj < 1 || yj > cols - 1 {
                        continue;
                    }
                    sum += src.get(xi as usize, yj as usize);
                }
            }
            if src.get(x as usize, y as usize) < sum / area {
                out.set(x as usize, y as usize, 0.0);
            }
        }
    }

    Ok(out)
}
