use contour_detector::image::GridF32;

/// Axis-aligned filled square.
#[derive(Clone, Copy, Debug)]
pub struct Square {
    pub top: usize,
    pub left: usize,
    pub side: usize,
    pub value: f32,
}

impl Square {
    /// Whether `(x, y)` lies within one pixel of the square's outline, the
    /// only place a 3×3 derivative can respond.
    pub fn near_outline(&self, x: usize, y: usize) -> bool {
        let outer_x = x + 1 >= self.top && x <= self.top + self.side;
        let outer_y = y + 1 >= self.left && y <= self.left + self.side;
        let inner_x = x > self.top && x + 2 < self.top + self.side;
        let inner_y = y > self.left && y + 2 < self.left + self.side;
        outer_x && outer_y && !(inner_x && inner_y)
    }
}

/// Uniform `background` with the given squares painted on top.
pub fn squares_image(rows: usize, cols: usize, background: f32, squares: &[Square]) -> GridF32 {
    assert!(rows > 0 && cols > 0, "image dimensions must be positive");

    let mut img = GridF32::filled(rows, cols, background);
    for sq in squares {
        assert!(
            sq.top + sq.side <= rows && sq.left + sq.side <= cols,
            "square must fit inside the image"
        );
        for x in sq.top..sq.top + sq.side {
            for y in sq.left..sq.left + sq.side {
                img.set(x, y, sq.value);
            }
        }
    }
    img
}

/// Five 24-pixel squares of increasing contrast on a dark background, 8
/// pixels apart. The spread of edge strengths gives the module histogram
/// several populated levels.
pub fn graded_squares() -> (GridF32, Vec<Square>) {
    let squares: Vec<Square> = (0..5)
        .map(|k| Square {
            top: 12,
            left: 8 + k * 32,
            side: 24,
            value: 20.0 + 40.0 * (k as f32 + 1.0),
        })
        .collect();
    (squares_image(48, 168, 20.0, &squares), squares)
}

/// Binary 0/255 mask from booleans laid row-major inside a zero frame one
/// pixel wide.
pub fn framed_mask(inner_rows: usize, inner_cols: usize, bits: &[bool]) -> GridF32 {
    assert_eq!(bits.len(), inner_rows * inner_cols, "bit count must fill the interior");

    let mut img = GridF32::new(inner_rows + 2, inner_cols + 2);
    for (i, &on) in bits.iter().enumerate() {
        if on {
            img.set(i / inner_cols + 1, i % inner_cols + 1, 255.0);
        }
    }
    img
}

/// Thin 0/255 ring: pixels whose distance to `center` is within half a pixel
/// of `radius`.
pub fn ring(rows: usize, cols: usize, center: (f32, f32), radius: f32) -> GridF32 {
    let mut img = GridF32::new(rows, cols);
    for x in 0..rows {
        for y in 0..cols {
            let d = ((x as f32 - center.0).powi(2) + (y as f32 - center.1).powi(2)).sqrt();
            if (d - radius).abs() < 0.5 {
                img.set(x, y, 255.0);
            }
        }
    }
    img
}
