//! Owned row-major 2D grid used by every stage of the pipeline.
//!
//! Coordinates are `(x, y)` = `(row, column)`. Rows are contiguous, so a row
//! slice can be borrowed without copying. Float grids carry intensity and
//! gradient data, `u8` grids carry binary masks and vote counts, and
//! `[f32; 3]` grids carry the direction color coding.
use crate::error::{DetectError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    /// Number of rows (image height)
    pub rows: usize,
    /// Number of columns (image width)
    pub cols: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

pub type GridF32 = Grid<f32>;
pub type GridU8 = Grid<u8>;
pub type ColorGrid = Grid<[f32; 3]>;

impl<T: Copy + Default> Grid<T> {
    /// Construct a grid of `rows × cols` cells set to `T::default()`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap an existing buffer; its length must be `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(DetectError::InvariantViolation(format!(
                "grid buffer holds {} cells, expected {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Flat index of `(x, y)`.
    ///
    /// Panics when either coordinate is outside the grid; use `try_get` /
    /// `try_set` for coordinates that may fall off the border.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.rows && y < self.cols,
            "({x}, {y}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        x * self.cols + y
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.rows && (y as usize) < self.cols
    }

    /// Bounds-checked read with signed coordinates; `None` outside the grid.
    #[inline]
    pub fn try_get(&self, x: isize, y: isize) -> Option<T> {
        self.contains(x, y)
            .then(|| self.data[x as usize * self.cols + y as usize])
    }

    /// Bounds-checked write; returns `false` and leaves the grid untouched
    /// when `(x, y)` is outside.
    #[inline]
    pub fn try_set(&mut self, x: isize, y: isize, v: T) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let i = x as usize * self.cols + y as usize;
        self.data[i] = v;
        true
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl GridF32 {
    /// Count cells holding a nonzero value.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }
}

impl GridU8 {
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Widen to a float grid (vote counts, binary masks).
    pub fn to_f32(&self) -> GridF32 {
        self.map(f32::from)
    }
}

impl<T: Copy> crate::image::traits::GridView for Grid<T> {
    type Pixel = T;

    #[inline]
    fn n_rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn n_cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, x: usize) -> &[T] {
        let start = x * self.cols;
        &self.data[start..start + self.cols]
    }
}

impl<T: Copy> crate::image::traits::GridViewMut for Grid<T> {
    #[inline]
    fn row_mut(&mut self, x: usize) -> &mut [T] {
        let start = x * self.cols;
        let end = start + self.cols;
        &mut self.data[start..end]
    }
}
