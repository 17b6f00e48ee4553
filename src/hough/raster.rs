//! Integer rasterization of lines and circles into `u8` grids.
use crate::image::GridU8;

/// Draw the segment `from → to` with Bresenham's integer-error walk.
///
/// Both endpoints are drawn. Pixels outside the grid are skipped, the walk
/// itself is unaffected by clipping.
pub fn bresenham(image: &mut GridU8, from: (isize, isize), to: (isize, isize), value: u8) {
    let (mut x, mut y) = from;
    let (x2, y2) = to;

    let ix = (x2 - x).signum();
    let iy = (y2 - y).signum();
    let delta_x = (x2 - x).abs() * 2;
    let delta_y = (y2 - y).abs() * 2;

    image.try_set(x, y, value);

    if delta_x >= delta_y {
        let mut error = delta_y - delta_x / 2;
        while x != x2 {
            // On a tie, step sideways only when moving forward.
            if error >= 0 && (error != 0 || ix > 0) {
                error -= delta_x;
                y += iy;
            }
            error += delta_y;
            x += ix;
            image.try_set(x, y, value);
        }
    } else {
        let mut error = delta_x - delta_y / 2;
        while y != y2 {
            if error >= 0 && (error != 0 || iy > 0) {
                error -= delta_y;
                x += ix;
            }
            error += delta_x;
            y += iy;
            image.try_set(x, y, value);
        }
    }
}

/// Midpoint circle of `radius` around `center` (row, column), clipped.
pub fn draw_circle(image: &mut GridU8, center: (isize, isize), radius: isize, value: u8) {
    let (cx, cy) = center;
    if radius <= 0 {
        image.try_set(cx, cy, value);
        return;
    }

    let mut dx = radius;
    let mut dy = 0isize;
    let mut decision = 1 - radius;
    while dx >= dy {
        for (px, py) in [
            (dx, dy),
            (dy, dx),
            (-dy, dx),
            (-dx, dy),
            (-dx, -dy),
            (-dy, -dx),
            (dy, -dx),
            (dx, -dy),
        ] {
            image.try_set(cx + px, cy + py, value);
        }
        dy += 1;
        if decision < 0 {
            decision += 2 * dy + 1;
        } else {
            dx -= 1;
            decision += 2 * (dy - dx) + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(image: &GridU8) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for x in 0..image.rows {
            for y in 0..image.cols {
                if image.get(x, y) != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn bresenham_straight_run() {
        let mut image = GridU8::new(8, 4);
        bresenham(&mut image, (0, 0), (5, 0), 9);
        assert_eq!(lit(&image), (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
        assert_eq!(image.get(3, 0), 9);
    }

    #[test]
    fn bresenham_steep_segment() {
        let mut image = GridU8::new(6, 6);
        bresenham(&mut image, (0, 0), (3, 4), 255);
        assert_eq!(lit(&image), vec![(0, 0), (1, 1), (2, 2), (2, 3), (3, 4)]);

        let mut reversed = GridU8::new(6, 6);
        bresenham(&mut reversed, (3, 4), (0, 0), 255);
        assert_eq!(lit(&reversed), lit(&image));
    }

    #[test]
    fn bresenham_all_octants() {
        // Half-slopes put the error on zero mid-walk in every octant.
        let cases: [((isize, isize), Vec<(usize, usize)>); 8] = [
            ((9, 7), vec![(5, 5), (6, 6), (7, 6), (8, 7), (9, 7)]),
            ((7, 9), vec![(5, 5), (6, 6), (6, 7), (7, 8), (7, 9)]),
            ((3, 9), vec![(3, 8), (3, 9), (4, 6), (4, 7), (5, 5)]),
            ((1, 7), vec![(1, 7), (2, 6), (3, 6), (4, 5), (5, 5)]),
            ((1, 3), vec![(1, 3), (2, 4), (3, 4), (4, 5), (5, 5)]),
            ((3, 1), vec![(3, 1), (4, 2), (4, 3), (5, 4), (5, 5)]),
            ((7, 1), vec![(5, 4), (5, 5), (6, 2), (6, 3), (7, 1)]),
            ((9, 3), vec![(5, 5), (6, 4), (7, 4), (8, 3), (9, 3)]),
        ];
        for (to, expected) in cases {
            let mut forward = GridU8::new(11, 11);
            bresenham(&mut forward, (5, 5), to, 1);
            assert_eq!(lit(&forward), expected, "(5, 5) -> {to:?}");

            let mut backward = GridU8::new(11, 11);
            bresenham(&mut backward, to, (5, 5), 1);
            assert_eq!(lit(&backward), expected, "{to:?} -> (5, 5)");
        }
    }

    #[test]
    fn bresenham_clips_outside_pixels() {
        let mut image = GridU8::new(3, 3);
        bresenham(&mut image, (1, -2), (1, 5), 1);
        assert_eq!(lit(&image), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn midpoint_circle_radius_three() {
        let mut image = GridU8::new(9, 9);
        draw_circle(&mut image, (4, 4), 3, 255);
        let pixels = lit(&image);
        assert_eq!(pixels.len(), 16);
        for (x, y) in pixels {
            let d = ((x as f32 - 4.0).powi(2) + (y as f32 - 4.0).powi(2)).sqrt();
            assert!((2.5..=3.5).contains(&d), "({x},{y}) at distance {d}");
        }
    }

    #[test]
    fn zero_radius_is_a_dot() {
        let mut image = GridU8::new(3, 3);
        draw_circle(&mut image, (1, 1), 0, 255);
        assert_eq!(lit(&image), vec![(1, 1)]);
    }
}
