//! Voting-based primitive detection on binary edge maps.
//!
//! - [`line`]: (rho, theta) accumulator, border-to-border line extraction,
//!   trimming against the source shape and a vote threshold that keeps the
//!   strongest lines.
//! - [`circle`]: fixed-radius and free-radius circle accumulators and their
//!   extraction.
//! - [`raster`]: Bresenham lines and midpoint circles used to draw results.
//!
//! Accumulators hold saturating `u8` votes.

pub mod circle;
pub mod line;
pub mod raster;

pub use circle::{
    circle_accumulator_fixed, circle_accumulator_free, extract_circles_fixed,
    extract_circles_free, Accumulator3,
};
pub use line::{
    limit_segment, segment_accumulator, segment_threshold, segments_from_accumulator, LineSpace,
};
pub use raster::{bresenham, draw_circle};
