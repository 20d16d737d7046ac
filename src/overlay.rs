//! Grid line rendering for alignment and preview images

use image::{Pixel, Rgba, RgbaImage};

use crate::models::{GridParameters, ResultImage, SourceImage};
use crate::output::{scale_image, OutputError};

/// Source x (or y) positions of the grid lines that land inside `extent`.
///
/// Lines sit at `i * cell_size + offset` for `i` in `0..=ceil(extent / cell_size)`.
pub fn grid_line_positions(extent: u32, cell_size: u32, offset: u32) -> Vec<u32> {
    let count = extent.div_ceil(cell_size.max(1));
    (0..=count)
        .map(|i| i as u64 * cell_size as u64 + offset as u64)
        .take_while(|&pos| pos < extent as u64)
        .map(|pos| pos as u32)
        .collect()
}

/// Copy of `source` with the grid drawn on top, blended with `color`.
pub fn draw_grid_overlay(source: &SourceImage, grid: &GridParameters, color: [u8; 4]) -> RgbaImage {
    let mut image = source.to_rgba_image();
    let (width, height) = image.dimensions();
    let columns = grid_line_positions(width, grid.cell_size(), grid.offset_x());
    let rows = grid_line_positions(height, grid.cell_size(), grid.offset_y());
    draw_lines(&mut image, &columns, &rows, Rgba(color));
    image
}

/// Upscale `result` by `scale` and outline every output pixel with `color`.
///
/// Fails only when the scaled size does not fit in `u32`.
pub fn draw_preview_grid(
    result: &ResultImage,
    scale: u32,
    color: [u8; 4],
) -> Result<RgbaImage, OutputError> {
    let mut image = scale_image(result.clone().into_rgba_image(), scale)?;
    if scale < 2 {
        return Ok(image);
    }
    let (width, height) = image.dimensions();
    let columns = grid_line_positions(width, scale, 0);
    let rows = grid_line_positions(height, scale, 0);
    draw_lines(&mut image, &columns, &rows, Rgba(color));
    Ok(image)
}

fn draw_lines(image: &mut RgbaImage, columns: &[u32], rows: &[u32], color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    for &x in columns {
        for y in 0..height {
            image.get_pixel_mut(x, y).blend(&color);
        }
    }
    for &y in rows {
        for x in 0..width {
            // Crossings were already blended by the column pass
            if columns.contains(&x) {
                continue;
            }
            image.get_pixel_mut(x, y).blend(&color);
        }
    }
}
