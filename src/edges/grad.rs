//! Combination of directional filter responses into a gradient module and
//! slope, plus the four-quadrant color coding used for visualization.
//!
//! - `module_linf`: per-pixel max of the absolute components.
//! - `module_l1`: per-pixel sum of the two largest absolute components.
//! - `slope`: `atan2(c1, c0)` in (−π, π]; with four components the result is
//!   `max(atan2(c3, c2), atan2(c1, c0))`.
//!
//! Both modules are rescaled to [0, 255] so that histogram thresholds can be
//! applied directly.
use super::filter::filter_directions;
use super::kernel::Kernel;
use crate::error::{invariant, Result};
use crate::image::{ColorGrid, GridF32};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormType {
    #[default]
    LInfinity,
    L1,
}

/// Gradient of an image: directional responses, module and slope.
#[derive(Clone, Debug)]
pub struct Grad {
    /// One filtered grid per direction (2 or 4)
    pub components: Vec<GridF32>,
    /// Combined magnitude in [0, 255]
    pub module: GridF32,
}

/// Filter `src` once per kernel and combine the responses with `norm`.
pub fn image_gradients(src: &GridF32, kernels: &[Kernel], norm: NormType) -> Result<Grad> {
    let components = filter_directions(src, kernels);
    let module = module(&components, norm)?;
    Ok(Grad { components, module })
}

fn check_components(components: &[GridF32]) -> Result<(usize, usize)> {
    if components.len() != 2 && components.len() != 4 {
        return Err(invariant(format!(
            "expected 2 or 4 directional components, got {}",
            components.len()
        )));
    }
    let first = &components[0];
    if components.iter().any(|c| !c.same_shape(first)) {
        return Err(invariant("directional components differ in size"));
    }
    Ok((first.rows, first.cols))
}

fn min_max(src: &GridF32) -> Option<(f32, f32)> {
    src.data.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Rescale the observed [min, max] range of `src` to [0, 255] in place.
///
/// A uniform grid has no range to stretch and is set to zero.
pub fn normalize(src: &mut GridF32) {
    let Some((min, max)) = min_max(src) else {
        return;
    };
    let range = max - min;
    if range <= 0.0 {
        log::warn!("normalize: uniform grid (value {min}), output set to zero");
        src.data.iter_mut().for_each(|v| *v = 0.0);
        return;
    }
    let scale = 255.0 / range;
    for v in src.data.iter_mut() {
        *v = (*v - min) * scale;
    }
}

/// Pure variant of [`normalize`].
pub fn normalized(src: &GridF32) -> GridF32 {
    let mut out = src.clone();
    normalize(&mut out);
    out
}

/// L∞ module: per pixel, the largest absolute component.
pub fn module_linf(components: &[GridF32]) -> Result<GridF32> {
    let (rows, cols) = check_components(components)?;
    let mut out = GridF32::new(rows, cols);
    for (i, dst) in out.data.iter_mut().enumerate() {
        *dst = components
            .iter()
            .map(|c| c.data[i].abs())
            .fold(0.0f32, f32::max);
    }
    normalize(&mut out);
    Ok(out)
}

/// L1 module restricted to the two dominant components.
pub fn module_l1(components: &[GridF32]) -> Result<GridF32> {
    let (rows, cols) = check_components(components)?;
    let mut out = GridF32::new(rows, cols);
    for (i, dst) in out.data.iter_mut().enumerate() {
        let a = components[0].data[i].abs();
        let b = components[1].data[i].abs();
        let (mut max1, mut max2) = if a > b { (a, b) } else { (b, a) };
        for c in &components[2..] {
            let v = c.data[i].abs();
            if v > max1 {
                max2 = max1;
                max1 = v;
            } else if v > max2 {
                max2 = v;
            }
        }
        *dst = max1 + max2;
    }
    normalize(&mut out);
    Ok(out)
}

pub fn module(components: &[GridF32], norm: NormType) -> Result<GridF32> {
    match norm {
        NormType::LInfinity => module_linf(components),
        NormType::L1 => module_l1(components),
    }
}

/// Gradient direction per pixel; zero wherever `module` is zero.
pub fn slope(components: &[GridF32], module: &GridF32) -> Result<GridF32> {
    let (rows, cols) = check_components(components)?;
    if module.rows != rows || module.cols != cols {
        return Err(invariant("module and components differ in size"));
    }
    let mut out = GridF32::new(rows, cols);
    for (i, dst) in out.data.iter_mut().enumerate() {
        if module.data[i] == 0.0 {
            continue;
        }
        let mut theta = components[1].data[i].atan2(components[0].data[i]);
        if components.len() == 4 {
            theta = components[3].data[i].atan2(components[2].data[i]).max(theta);
        }
        *dst = theta;
    }
    Ok(out)
}

/// Four-quadrant color coding of the gradient direction, weighted by module.
///
/// | slope range      | channels set |
/// |------------------|--------------|
/// | [−π, −π/2)       | 1            |
/// | [−π/2, 0)        | 0 and 2      |
/// | [0, π/2)         | 0            |
/// | [π/2, π]         | 2            |
pub fn color_map(slope: &GridF32, module: &GridF32) -> Result<ColorGrid> {
    if !slope.same_shape(module) {
        return Err(invariant("slope and module differ in size"));
    }
    let mut out = ColorGrid::new(module.rows, module.cols);
    for (i, dst) in out.data.iter_mut().enumerate() {
        let m = module.data[i];
        if m == 0.0 {
            continue;
        }
        let s = slope.data[i];
        *dst = if (-PI..-FRAC_PI_2).contains(&s) {
            [0.0, m, 0.0]
        } else if (-FRAC_PI_2..0.0).contains(&s) {
            [m, 0.0, m]
        } else if (0.0..FRAC_PI_2).contains(&s) {
            [m, 0.0, 0.0]
        } else {
            [0.0, 0.0, m]
        };
    }
    Ok(out)
}
