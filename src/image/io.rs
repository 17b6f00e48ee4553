//! I/O helpers for grayscale grids and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/BMP into a float grid (0..=255).
//! - `save_grid_f32`: write a float grid to a grayscale PNG, clamped to [0, 255].
//! - `save_grid_u8`: write a mask or vote grid to a grayscale PNG.
//! - `save_color_grid`: write the direction color coding to an RGB PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorGrid, GridF32, GridU8, GridView};
use crate::error::{DetectError, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit luma and widen to `f32`.
pub fn load_grayscale_image(path: &Path) -> Result<GridF32> {
    let img = image::open(path)
        .map_err(|e| DetectError::Io(format!("Failed to open {}: {e}", path.display())))?
        .into_luma8();
    let cols = img.width() as usize;
    let rows = img.height() as usize;
    let data = img.into_raw().into_iter().map(f32::from).collect();
    GridF32::from_vec(rows, cols, data)
}

/// Save a float grid to a grayscale PNG, clamping values in [0, 255].
pub fn save_grid_f32(grid: &GridF32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(grid.cols as u32, grid.rows as u32);
    for (x, row) in grid.row_iter().enumerate() {
        for (y, &px) in row.iter().enumerate() {
            let v = px.clamp(0.0, 255.0);
            out.put_pixel(y as u32, x as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| DetectError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Save an 8-bit grid to a grayscale PNG.
pub fn save_grid_u8(grid: &GridU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(grid.cols as u32, grid.rows as u32, grid.data.clone())
        .ok_or_else(|| DetectError::Io("Failed to create image buffer".to_string()))?;
    image
        .save(path)
        .map_err(|e| DetectError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Save a three-channel float grid to an RGB PNG, clamping each channel.
pub fn save_color_grid(grid: &ColorGrid, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(grid.cols as u32, grid.rows as u32);
    for (x, row) in grid.row_iter().enumerate() {
        for (y, &px) in row.iter().enumerate() {
            let c = px.map(|v| v.clamp(0.0, 255.0) as u8);
            out.put_pixel(y as u32, x as u32, Rgb(c));
        }
    }
    out.save(path)
        .map_err(|e| DetectError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        DetectError::Io(format!("Failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json)
        .map_err(|e| DetectError::Io(format!("Failed to write JSON {}: {e}", path.display())))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                DetectError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
