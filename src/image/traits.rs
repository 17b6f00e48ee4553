/// Read access to a row-major grid, one row slice at a time.
pub trait GridView {
    type Pixel: Copy;

    fn n_rows(&self) -> usize;
    fn n_cols(&self) -> usize;

    fn row(&self, x: usize) -> &[Self::Pixel];

    fn row_iter(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { grid: self, x: 0 }
    }
}

pub trait GridViewMut: GridView {
    fn row_mut(&mut self, x: usize) -> &mut [Self::Pixel];
}

pub struct Rows<'a, G: ?Sized + GridView> {
    grid: &'a G,
    x: usize,
}

impl<'a, G: GridView> Iterator for Rows<'a, G> {
    type Item = &'a [G::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.grid.n_rows() {
            return None;
        }
        let x = self.x;
        self.x += 1;
        Some(self.grid.row(x))
    }
}
