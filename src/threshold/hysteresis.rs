//! Dual-threshold (hysteresis) filtering with 4-connectivity.
//!
//! Strong cells (above the high threshold) are always kept. Weak cells (above
//! the low threshold only) are kept when one of their up/left/down/right
//! neighbours is strong. Connectivity is a single step; weak chains are not
//! followed.
use super::global::{apply_threshold, global_threshold};
use crate::error::{invariant, Result};
use crate::image::GridF32;
use serde::Serialize;

const NEIGHBORS_4: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Thresholds determined by the hysteresis stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HysteresisThresholds {
    pub high: u32,
    pub low: u32,
}

/// Derive both thresholds from the histogram, then filter.
///
/// `high_percent` must produce a strictly larger threshold than
/// `low_percent`; the smaller the kept share, the higher the threshold.
pub fn hysteresis(
    src: &GridF32,
    high_percent: f32,
    low_percent: f32,
) -> Result<(GridF32, HysteresisThresholds)> {
    let high = global_threshold(src, high_percent)?;
    let low = global_threshold(src, low_percent)?;
    log::debug!("hysteresis: high={high} low={low}");
    let thresholds = HysteresisThresholds { high, low };
    let out = hysteresis_with_thresholds(src, thresholds)?;
    Ok((out, thresholds))
}

/// Hysteresis filtering with explicit thresholds.
pub fn hysteresis_with_thresholds(
    src: &GridF32,
    thresholds: HysteresisThresholds,
) -> Result<GridF32> {
    if thresholds.high <= thresholds.low {
        return Err(invariant(format!(
            "hysteresis high threshold {} must exceed low threshold {}",
            thresholds.high, thresholds.low
        )));
    }
    let high_map = apply_threshold(src, thresholds.high);
    let low_map = apply_threshold(src, thresholds.low);

    let mut out = GridF32::new(src.rows, src.cols);
    for x in 0..src.rows {
        for y in 0..src.cols {
            let strong = high_map.get(x, y);
            if strong != 0.0 {
                out.set(x, y, strong);
                continue;
            }
            let weak = low_map.get(x, y);
            if weak == 0.0 {
                continue;
            }
            let connected = NEIGHBORS_4.iter().any(|&(dx, dy)| {
                high_map
                    .try_get(x as isize + dx, y as isize + dy)
                    .is_some_and(|v| v != 0.0)
            });
            if connected {
                out.set(x, y, weak);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;

    #[test]
    fn weak_pixel_next_to_strong_survives() {
        let mut src = GridF32::new(5, 5);
        src.set(2, 2, 200.0);
        src.set(2, 3, 50.0);
        src.set(0, 4, 50.0);
        src.set(4, 4, 10.0);
        let out =
            hysteresis_with_thresholds(&src, HysteresisThresholds { high: 100, low: 30 }).unwrap();
        assert_eq!(out.get(2, 2), 200.0);
        assert_eq!(out.get(2, 3), 50.0);
        assert_eq!(out.get(0, 4), 0.0);
        assert_eq!(out.get(4, 4), 0.0);
    }

    #[test]
    fn diagonal_neighbour_does_not_connect() {
        let mut src = GridF32::new(3, 3);
        src.set(0, 0, 200.0);
        src.set(1, 1, 50.0);
        let out =
            hysteresis_with_thresholds(&src, HysteresisThresholds { high: 100, low: 30 }).unwrap();
        assert_eq!(out.get(1, 1), 0.0);
    }

    #[test]
    fn reports_both_thresholds() {
        // mass: 20·10 + 5·100 = 700
        let mut src = GridF32::new(5, 5);
        for (i, v) in src.data.iter_mut().enumerate() {
            *v = if i < 5 { 100.0 } else { 10.0 };
        }
        let (out, t) = hysteresis(&src, 50.0, 75.0).unwrap();
        // keep 50%: target 350, bin 10 brings 200, bin 100 brings 500 -> 101
        // keep 75%: target 175, bin 10 brings 200 -> 11
        assert_eq!(t, HysteresisThresholds { high: 101, low: 11 });
        assert_eq!(out.count_nonzero(), 0);
    }

    #[test]
    fn inverted_percentages_are_an_invariant_violation() {
        let mut src = GridF32::new(5, 5);
        for (i, v) in src.data.iter_mut().enumerate() {
            *v = if i < 5 { 100.0 } else { 10.0 };
        }
        let err = hysteresis(&src, 75.0, 50.0).unwrap_err();
        assert!(matches!(err, DetectError::InvariantViolation(_)));
    }
}
