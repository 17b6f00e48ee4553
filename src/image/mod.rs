pub mod grid;
pub mod io;
pub mod traits;

pub use self::grid::{ColorGrid, Grid, GridF32, GridU8};
pub use self::traits::{GridView, GridViewMut, Rows};
