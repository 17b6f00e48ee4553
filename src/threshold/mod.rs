//! Module thresholding strategies.
//!
//! Three interchangeable strategies consume the normalized module and return a
//! filtered copy plus whatever threshold values they determined:
//!
//! - `Global`: histogram-based level keeping a share of the gradient mass.
//! - `Local`: comparison against the mean of a square window.
//! - `Hysteresis`: two global levels joined by 4-connectivity.
//!
//! Parameters are carried explicitly by [`ThresholdParams`].

pub mod global;
pub mod hysteresis;
pub mod local;

pub use global::{apply_threshold, apply_threshold_in_place, global_threshold, histogram};
pub use hysteresis::{hysteresis, hysteresis_with_thresholds, HysteresisThresholds};
pub use local::local_threshold;

use crate::error::{DetectError, Result};
use crate::image::{GridF32, GridU8};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMethod {
    Global,
    Local,
    #[default]
    Hysteresis,
}

/// Knobs for the three strategies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub method: ThresholdMethod,
    /// Share (%) of the weighted module mass kept by the global strategy.
    pub global_percent: f32,
    /// Half-size of the local mean window.
    pub local_window: usize,
    /// Share (%) kept by the hysteresis high threshold.
    pub hysteresis_high_percent: f32,
    /// Share (%) kept by the hysteresis low threshold.
    pub hysteresis_low_percent: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            method: ThresholdMethod::default(),
            global_percent: 60.0,
            local_window: 15,
            hysteresis_high_percent: 50.0,
            hysteresis_low_percent: 75.0,
        }
    }
}

impl ThresholdParams {
    pub fn validate(&self) -> Result<()> {
        let percents = [
            ("global_percent", self.global_percent),
            ("hysteresis_high_percent", self.hysteresis_high_percent),
            ("hysteresis_low_percent", self.hysteresis_low_percent),
        ];
        for (name, p) in percents {
            if !(0.0..=100.0).contains(&p) {
                return Err(DetectError::Config(format!(
                    "{name} must lie in [0, 100], got {p}"
                )));
            }
        }
        if self.local_window == 0 {
            return Err(DetectError::Config("local_window must be positive".into()));
        }
        Ok(())
    }
}

/// Threshold values determined while filtering, when the strategy has any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdValues {
    pub global: Option<u32>,
    pub hysteresis_high: Option<u32>,
    pub hysteresis_low: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ThresholdOutcome {
    pub module: GridF32,
    pub values: ThresholdValues,
}

/// Run the strategy selected by `params.method` on `module`.
pub fn run_threshold(module: &GridF32, params: &ThresholdParams) -> Result<ThresholdOutcome> {
    params.validate()?;
    match params.method {
        ThresholdMethod::Global => {
            let t = global_threshold(module, params.global_percent)?;
            log::debug!("threshold: global {} % -> {t}", params.global_percent);
            Ok(ThresholdOutcome {
                module: apply_threshold(module, t),
                values: ThresholdValues {
                    global: Some(t),
                    ..Default::default()
                },
            })
        }
        ThresholdMethod::Local => Ok(ThresholdOutcome {
            module: local_threshold(module, params.local_window)?,
            values: ThresholdValues::default(),
        }),
        ThresholdMethod::Hysteresis => {
            let (out, t) = hysteresis(
                module,
                params.hysteresis_high_percent,
                params.hysteresis_low_percent,
            )?;
            Ok(ThresholdOutcome {
                module: out,
                values: ThresholdValues {
                    hysteresis_high: Some(t.high),
                    hysteresis_low: Some(t.low),
                    ..Default::default()
                },
            })
        }
    }
}

/// Remove cells with at most `n` nonzero cells (themselves included) in their
/// `(2n+1)²` neighbourhood. Works in place, so earlier removals affect later
/// counts. Cells closer than `n` to the border are left alone.
pub fn suppress_isolated_points(src: &mut GridF32, n: usize) {
    if src.rows <= 2 * n || src.cols <= 2 * n {
        return;
    }
    let r = n as isize;
    for x in n..src.rows - n {
        for y in n..src.cols - n {
            let mut count = 0usize;
            for i in -r..=r {
                for j in -r..=r {
                    let xi = (x as isize + i) as usize;
                    let yj = (y as isize + j) as usize;
                    if src.get(xi, yj) != 0.0 {
                        count += 1;
                    }
                }
            }
            if count <= n {
                src.set(x, y, 0.0);
            }
        }
    }
}

/// Nonzero cells become 255, everything else 0.
pub fn to_binary(src: &GridF32) -> GridU8 {
    src.map(|v| if v > 0.0 { 255 } else { 0 })
}
