//! Line Hough transform over a (rho, theta) accumulator.
//!
//! Theta covers `[-π/2, π)` in `max_rho` steps and rho is quantized by `√2`,
//! so the accumulator is `nb_theta × nb_rho` cells of saturating `u8` votes.
//! Extracted lines are clipped against the image border and drawn with
//! [`bresenham`](super::raster::bresenham), each pixel carrying the vote
//! count of its line.
use super::raster::bresenham;
use crate::error::{invariant, Result};
use crate::image::{GridF32, GridU8};
use std::collections::BTreeSet;
use std::f32::consts::{FRAC_PI_2, PI, SQRT_2};

/// Number of distinct vote levels kept by [`segment_threshold`].
pub const SEGMENT_LEVELS: usize = 6;

/// Sampling of the (rho, theta) plane for an image of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpace {
    pub max_rho: usize,
    pub nb_theta: usize,
    pub nb_rho: usize,
    pub delta_theta: f32,
    pub delta_rho: f32,
}

impl LineSpace {
    pub fn new(rows: usize, cols: usize) -> Self {
        let diag = ((rows * rows + cols * cols) as f32).sqrt();
        let max_rho = (diag.ceil() as usize).max(1);
        Self {
            max_rho,
            nb_theta: max_rho,
            nb_rho: (max_rho as f32 / SQRT_2).round() as usize + 1,
            delta_theta: (3.0 * PI / 2.0) / max_rho as f32,
            delta_rho: SQRT_2,
        }
    }

    #[inline]
    pub fn theta(&self, i: usize) -> f32 {
        -FRAC_PI_2 + i as f32 * self.delta_theta
    }
}

/// Vote every nonzero pixel of `image` into the line accumulator.
pub fn segment_accumulator(image: &GridF32) -> Result<GridU8> {
    let space = LineSpace::new(image.rows, image.cols);
    let mut acc = GridU8::new(space.nb_theta, space.nb_rho);
    let trig: Vec<(f32, f32)> = (0..space.nb_theta)
        .map(|i| {
            let theta = space.theta(i);
            (theta.cos(), theta.sin())
        })
        .collect();

    for x in 0..image.rows {
        for y in 0..image.cols {
            if image.get(x, y) == 0.0 {
                continue;
            }
            for (i, &(cos_t, sin_t)) in trig.iter().enumerate() {
                let rho = ((x as f32 * cos_t + y as f32 * sin_t) / space.delta_rho).round();
                if rho <= 0.0 {
                    continue;
                }
                let j = rho as usize;
                if j >= space.nb_rho {
                    return Err(invariant(format!(
                        "rho index {j} beyond accumulator width {}",
                        space.nb_rho
                    )));
                }
                let votes = acc.get(i, j);
                acc.set(i, j, votes.saturating_add(1));
            }
        }
    }

    log::debug!(
        "segment_accumulator: {}x{} cells, max_rho={}",
        space.nb_theta,
        space.nb_rho,
        space.max_rho
    );
    Ok(acc)
}

/// Truncate a border intersection and keep it when it lands in `[0, limit)`.
#[inline]
fn border_coord(value: f32, limit: usize) -> Option<isize> {
    if !value.is_finite() {
        return None;
    }
    let t = value.trunc();
    (t >= 0.0 && t < limit as f32).then_some(t as isize)
}

/// The first two border points of the line `rho = x cosθ + y sinθ`, probing
/// the top row, the left column, the right column and the bottom row.
fn border_points(
    rho: f32,
    cos_t: f32,
    sin_t: f32,
    rows: usize,
    cols: usize,
) -> Option<((isize, isize), (isize, isize))> {
    let last_row = rows as f32 - 1.0;
    let last_col = cols as f32 - 1.0;
    let candidates = [
        border_coord(rho / sin_t, cols).map(|y| (0, y)),
        border_coord(rho / cos_t, rows).map(|x| (x, 0)),
        border_coord((rho - last_col * sin_t) / cos_t, rows).map(|x| (x, cols as isize - 1)),
        border_coord((rho - last_row * cos_t) / sin_t, cols).map(|y| (rows as isize - 1, y)),
    ];
    let mut found = candidates.into_iter().flatten();
    let first = found.next()?;
    let second = found.next()?;
    Some((first, second))
}

/// Render every accumulator cell with at least `min_votes` votes as a line
/// across a `rows × cols` image.
pub fn segments_from_accumulator(acc: &GridU8, rows: usize, cols: usize, min_votes: u8) -> GridU8 {
    let space = LineSpace::new(rows, cols);
    let mut out = GridU8::new(rows, cols);
    let mut drawn = 0usize;

    for i in 0..acc.rows {
        let theta = space.theta(i);
        let (cos_t, sin_t) = (theta.cos(), theta.sin());
        for j in 0..acc.cols {
            let votes = acc.get(i, j);
            if votes < min_votes {
                continue;
            }
            let rho = j as f32 * space.delta_rho;
            if let Some((from, to)) = border_points(rho, cos_t, sin_t, rows, cols) {
                bresenham(&mut out, from, to, votes);
                drawn += 1;
            }
        }
    }

    log::debug!("segments_from_accumulator: {drawn} lines with >= {min_votes} votes");
    out
}

/// Cut the parts of drawn lines that run outside the shape in `src`.
///
/// Scanning every row from both ends and every column from both ends,
/// pixels are cleared until the first nonzero pixel of `src`.
pub fn limit_segment(image: &mut GridU8, src: &GridF32) -> Result<()> {
    if !image.same_shape(src) {
        return Err(invariant("limit_segment: image and source differ in size"));
    }
    let (rows, cols) = (src.rows, src.cols);

    for x in 0..rows {
        for y in 0..cols {
            if src.get(x, y) != 0.0 {
                break;
            }
            image.set(x, y, 0);
        }
        for y in (1..cols).rev() {
            if src.get(x, y) != 0.0 {
                break;
            }
            image.set(x, y, 0);
        }
    }

    for y in 0..cols {
        for x in 0..rows {
            if src.get(x, y) != 0.0 {
                break;
            }
            image.set(x, y, 0);
        }
        for x in (1..rows).rev() {
            if src.get(x, y) != 0.0 {
                break;
            }
            image.set(x, y, 0);
        }
    }
    Ok(())
}

/// Vote level that keeps only the strongest lines: the smallest of the
/// [`SEGMENT_LEVELS`] largest distinct values in `acc` (0 when empty).
pub fn segment_threshold(acc: &GridU8) -> u8 {
    let mut levels = BTreeSet::new();
    for &v in &acc.data {
        levels.insert(v);
        if levels.len() > SEGMENT_LEVELS {
            levels.pop_first();
        }
    }
    levels.first().copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical run at row 9 in an 18×24 image (diagonal exactly 30).
    fn row_segment() -> GridF32 {
        let mut image = GridF32::new(18, 24);
        for y in 2..22 {
            image.set(9, y, 255.0);
        }
        image
    }

    #[test]
    fn line_space_dimensions() {
        let space = LineSpace::new(18, 24);
        assert_eq!(space.max_rho, 30);
        assert_eq!(space.nb_theta, 30);
        assert_eq!(space.nb_rho, 22);
        assert!(space.theta(10).abs() < 1e-5);
    }

    #[test]
    fn collinear_pixels_share_one_cell() {
        let acc = segment_accumulator(&row_segment()).unwrap();
        assert_eq!((acc.rows, acc.cols), (30, 22));
        assert_eq!(acc.get(10, 6), 20);
        let peaks = acc.data.iter().filter(|&&v| v >= 20).count();
        assert_eq!(peaks, 1);
    }

    #[test]
    fn empty_image_has_no_votes() {
        let acc = segment_accumulator(&GridF32::new(10, 10)).unwrap();
        assert_eq!(acc.count_nonzero(), 0);
        assert_eq!(segment_threshold(&acc), 0);
    }

    #[test]
    fn strongest_line_is_drawn_border_to_border() {
        let acc = segment_accumulator(&row_segment()).unwrap();
        let lines = segments_from_accumulator(&acc, 18, 24, 20);
        // rho bin 6 maps back to 6·√2 ≈ 8.49, truncated to row 8.
        for y in 0..24 {
            assert_eq!(lines.get(8, y), 20);
        }
        assert_eq!(lines.count_nonzero(), 24);
    }

    #[test]
    fn threshold_keeps_six_levels() {
        let acc = GridU8::from_vec(2, 4, vec![0, 7, 1, 6, 2, 5, 3, 4]).unwrap();
        assert_eq!(segment_threshold(&acc), 2);
        let few = GridU8::from_vec(1, 3, vec![4, 4, 9]).unwrap();
        assert_eq!(segment_threshold(&few), 4);
        assert_eq!(segment_threshold(&GridU8::new(0, 0)), 0);
    }

    #[test]
    fn limit_trims_outside_the_shape() {
        let mut src = GridF32::new(5, 7);
        for x in 1..=3 {
            for y in 2..=4 {
                src.set(x, y, 255.0);
            }
        }
        let mut image = GridU8::new(5, 7);
        bresenham(&mut image, (2, 0), (2, 6), 255);

        limit_segment(&mut image, &src).unwrap();
        let kept: Vec<usize> = (0..7).filter(|&y| image.get(2, y) != 0).collect();
        assert_eq!(kept, vec![2, 3, 4]);
    }

    #[test]
    fn limit_rejects_mismatched_sizes() {
        let mut image = GridU8::new(4, 4);
        assert!(limit_segment(&mut image, &GridF32::new(4, 5)).is_err());
    }
}
