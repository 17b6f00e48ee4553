//! 3×3 convolution with a zero border.
//!
//! Output cells on the first/last row and column are left at zero; interior
//! cells receive `Σ src[x+i, y+j] · k[i+1, j+1]` for `i, j ∈ {-1, 0, 1}`.
//! Values are not clamped, callers normalize when they need a display range.
//!
//! Complexity: O(rows·cols) per kernel.
use super::kernel::Kernel;
use crate::image::{GridF32, GridView, GridViewMut};
use rayon::prelude::*;

/// Convolve `src` with a single 3×3 kernel.
pub fn filter(src: &GridF32, kernel: &Kernel) -> GridF32 {
    let rows = src.rows;
    let cols = src.cols;
    let mut out = GridF32::new(rows, cols);
    if rows < 3 || cols < 3 {
        return out;
    }

    for x in 1..rows - 1 {
        let neighborhood = [src.row(x - 1), src.row(x), src.row(x + 1)];
        let out_row = out.row_mut(x);
        for y in 1..cols - 1 {
            let mut sum = 0.0;
            for (i, src_row) in neighborhood.iter().enumerate() {
                sum += src_row[y - 1] * kernel.weight(i, 0)
                    + src_row[y] * kernel.weight(i, 1)
                    + src_row[y + 1] * kernel.weight(i, 2);
            }
            out_row[y] = sum;
        }
    }

    out
}

/// Run one convolution per kernel. Directions are independent, so they are
/// filtered in parallel; the result keeps the kernel order.
pub fn filter_directions(src: &GridF32, kernels: &[Kernel]) -> Vec<GridF32> {
    kernels.par_iter().map(|k| filter(src, k)).collect()
}
