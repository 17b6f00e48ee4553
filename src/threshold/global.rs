//! Global threshold chosen from the module histogram.
//!
//! The threshold is the smallest level `i` such that the weighted histogram
//! mass `Σ_{k=1}^{i-1} hist[k]·k` reaches `(100 − percent)%` of the total
//! mass. `percent` is therefore the share of gradient energy that stays above
//! the threshold.
use crate::error::{invariant, Result};
use crate::image::GridF32;

pub const HISTOGRAM_BINS: usize = 256;

/// 256-bin histogram of the truncated cell values, plus the sum of those
/// truncated values.
pub fn histogram(src: &GridF32) -> Result<([u64; HISTOGRAM_BINS], u64)> {
    let mut hist = [0u64; HISTOGRAM_BINS];
    let mut total = 0u64;
    for &v in &src.data {
        if !(0.0..256.0).contains(&v) {
            return Err(invariant(format!(
                "module value {v} is outside the histogram range [0, 255]"
            )));
        }
        let bin = v as usize;
        hist[bin] += 1;
        total += bin as u64;
    }
    Ok((hist, total))
}

/// Threshold keeping `percent` % of the weighted module mass.
pub fn global_threshold(src: &GridF32, percent: f32) -> Result<u32> {
    let (hist, total) = histogram(src)?;
    let target = (total as f64 * ((100.0 - f64::from(percent)) / 100.0)) as u64;
    let mut sum = 0u64;
    let mut i = 1usize;
    while sum < target && i < HISTOGRAM_BINS - 1 {
        sum += hist[i] * i as u64;
        i += 1;
    }
    log::debug!("global_threshold: sum={total} target={target} -> {i}");
    Ok(i as u32)
}

/// Zero every cell strictly below `threshold`, in place.
pub fn apply_threshold_in_place(src: &mut GridF32, threshold: u32) {
    let t = threshold as f32;
    for v in src.data.iter_mut() {
        if *v < t {
            *v = 0.0;
        }
    }
}

/// Pure variant of [`apply_threshold_in_place`].
pub fn apply_threshold(src: &GridF32, threshold: u32) -> GridF32 {
    let mut out = src.clone();
    apply_threshold_in_place(&mut out, threshold);
    out
}
