//! Circle Hough transform, with a fixed radius (2D accumulator over centres)
//! or a free radius (3D accumulator over centres and radii).
//!
//! A foreground pixel `(x, y)` votes for every centre row `b` with
//! `a = x - √(r² - (y - b)²)`, keeping `a > 0` and rounding it to a cell.
use super::raster::draw_circle;
use crate::error::{invariant, Result};
use crate::image::{GridF32, GridU8};

/// Pixels below this value do not vote.
pub const CIRCLE_EPSILON: f32 = 0.001;

/// Saturating `u8` votes over `(b, a, r)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator3 {
    pub nb_b: usize,
    pub nb_a: usize,
    pub nb_r: usize,
    pub data: Vec<u8>,
}

impl Accumulator3 {
    pub fn new(nb_b: usize, nb_a: usize, nb_r: usize) -> Self {
        Self {
            nb_b,
            nb_a,
            nb_r,
            data: vec![0; nb_b * nb_a * nb_r],
        }
    }

    #[inline]
    fn idx(&self, b: usize, a: usize, r: usize) -> usize {
        (b * self.nb_a + a) * self.nb_r + r
    }

    #[inline]
    pub fn get(&self, b: usize, a: usize, r: usize) -> u8 {
        self.data[self.idx(b, a, r)]
    }

    #[inline]
    pub fn set(&mut self, b: usize, a: usize, r: usize, votes: u8) {
        let i = self.idx(b, a, r);
        self.data[i] = votes;
    }

    #[inline]
    fn vote(&mut self, b: usize, a: usize, r: usize) {
        let i = self.idx(b, a, r);
        self.data[i] = self.data[i].saturating_add(1);
    }

    /// Votes for radius `r` as a `nb_b × nb_a` grid.
    pub fn radius_slice(&self, r: usize) -> GridU8 {
        let mut out = GridU8::new(self.nb_b, self.nb_a);
        if r >= self.nb_r {
            return out;
        }
        for b in 0..self.nb_b {
            for a in 0..self.nb_a {
                out.set(b, a, self.get(b, a, r));
            }
        }
        out
    }

    /// Best vote over all radii for each centre.
    pub fn max_over_radius(&self) -> GridU8 {
        let mut out = GridU8::new(self.nb_b, self.nb_a);
        for b in 0..self.nb_b {
            for a in 0..self.nb_a {
                let start = self.idx(b, a, 0);
                let best = self.data[start..start + self.nb_r]
                    .iter()
                    .copied()
                    .max()
                    .unwrap_or(0);
                out.set(b, a, best);
            }
        }
        out
    }
}

/// Column of the centre voted for by pixel `(x, y)` at centre row `b`.
#[inline]
fn centre_column(x: usize, y: usize, b: usize, r_sq: f32, nb_a: usize) -> Result<Option<usize>> {
    let dy = y as f32 - b as f32;
    let t = r_sq - dy * dy;
    if t < 0.0 {
        return Ok(None);
    }
    let a = x as f32 - t.sqrt();
    if a <= 0.0 {
        return Ok(None);
    }
    let column = a.round() as usize;
    if column >= nb_a {
        return Err(invariant(format!(
            "circle centre column {column} outside accumulator width {nb_a}"
        )));
    }
    Ok(Some(column))
}

/// Fixed-radius accumulator, `rows × cols`, indexed `(b, a)`.
pub fn circle_accumulator_fixed(image: &GridF32, radius: f32) -> Result<GridU8> {
    let mut acc = GridU8::new(image.rows, image.cols);
    let r_sq = radius * radius;
    for x in 0..image.rows {
        for y in 0..image.cols {
            if image.get(x, y) < CIRCLE_EPSILON {
                continue;
            }
            for b in 0..image.rows {
                if let Some(a) = centre_column(x, y, b, r_sq, acc.cols)? {
                    let votes = acc.get(b, a);
                    acc.set(b, a, votes.saturating_add(1));
                }
            }
        }
    }
    Ok(acc)
}

/// Free-radius accumulator over `(b, a, r)` with `r < max(rows, cols)`.
pub fn circle_accumulator_free(image: &GridF32) -> Result<Accumulator3> {
    let nb_r = image.rows.max(image.cols);
    let mut acc = Accumulator3::new(image.rows, image.cols, nb_r);
    for x in 0..image.rows {
        for y in 0..image.cols {
            if image.get(x, y) < CIRCLE_EPSILON {
                continue;
            }
            for r in 0..nb_r {
                let r_sq = (r * r) as f32;
                for b in 0..image.rows {
                    if let Some(a) = centre_column(x, y, b, r_sq, acc.nb_a)? {
                        acc.vote(b, a, r);
                    }
                }
            }
        }
    }
    log::debug!(
        "circle_accumulator_free: {}x{}x{} cells",
        acc.nb_b,
        acc.nb_a,
        acc.nb_r
    );
    Ok(acc)
}

/// Draw a circle of `radius` around every centre with at least `criteria`
/// votes. Centres are `(row b, column a)`.
pub fn extract_circles_fixed(
    acc: &GridU8,
    radius: f32,
    criteria: u8,
    rows: usize,
    cols: usize,
) -> GridU8 {
    let mut out = GridU8::new(rows, cols);
    let r = radius.round() as isize;
    let mut count = 0usize;
    for b in 0..acc.rows {
        for a in 0..acc.cols {
            if acc.get(b, a) >= criteria {
                draw_circle(&mut out, (b as isize, a as isize), r, 255);
                count += 1;
            }
        }
    }
    log::debug!("extract_circles_fixed: {count} circles of radius {r}");
    out
}

/// For every centre, draw the largest radius reaching `criteria` votes.
pub fn extract_circles_free(acc: &Accumulator3, criteria: u8, rows: usize, cols: usize) -> GridU8 {
    let mut out = GridU8::new(rows, cols);
    let mut count = 0usize;
    for b in 0..acc.nb_b {
        for a in 0..acc.nb_a {
            let best = (0..acc.nb_r).rev().find(|&r| acc.get(b, a, r) >= criteria);
            if let Some(r) = best {
                draw_circle(&mut out, (b as isize, a as isize), r as isize, 255);
                count += 1;
            }
        }
    }
    log::debug!("extract_circles_free: {count} circles");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(rows: usize, cols: usize, center: (isize, isize), radius: isize) -> GridF32 {
        let mut image = GridU8::new(rows, cols);
        draw_circle(&mut image, center, radius, 255);
        image.to_f32()
    }

    #[test]
    fn fixed_radius_peaks_at_the_centre() {
        let image = ring(21, 21, (10, 10), 5);
        let acc = circle_accumulator_fixed(&image, 5.0).unwrap();
        assert_eq!(acc.get(10, 10), 11);

        let circles = extract_circles_fixed(&acc, 5.0, 11, 21, 21);
        for x in 0..21 {
            for y in 0..21 {
                if image.get(x, y) > 0.0 {
                    assert_eq!(circles.get(x, y), 255, "ring pixel ({x},{y}) missing");
                }
            }
        }
    }

    #[test]
    fn free_radius_slices_match_fixed_radius() {
        let image = ring(11, 11, (5, 5), 3);
        let free = circle_accumulator_free(&image).unwrap();
        assert_eq!((free.nb_b, free.nb_a, free.nb_r), (11, 11, 11));
        for r in [2usize, 3, 4] {
            let fixed = circle_accumulator_fixed(&image, r as f32).unwrap();
            assert_eq!(free.radius_slice(r), fixed, "radius {r}");
        }
        assert!(free.max_over_radius().get(5, 5) >= free.get(5, 5, 3));
    }

    #[test]
    fn free_extraction_uses_the_largest_radius() {
        let mut acc = Accumulator3::new(11, 11, 6);
        acc.set(5, 5, 2, 3);
        acc.set(5, 5, 4, 3);
        acc.set(5, 5, 5, 1);
        let out = extract_circles_free(&acc, 2, 11, 11);
        assert_eq!(out.get(9, 5), 255);
        assert_eq!(out.get(7, 5), 0);
        assert_eq!(out.get(10, 5), 0);
    }

    #[test]
    fn centre_outside_the_accumulator_is_rejected() {
        let mut image = GridF32::new(10, 4);
        image.set(8, 2, 255.0);
        assert!(circle_accumulator_fixed(&image, 1.0).is_err());
    }

    #[test]
    fn faint_pixels_do_not_vote() {
        let mut image = GridF32::new(8, 8);
        image.set(4, 4, 0.0005);
        let acc = circle_accumulator_fixed(&image, 2.0).unwrap();
        assert_eq!(acc.count_nonzero(), 0);
    }
}
