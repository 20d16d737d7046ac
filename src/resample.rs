//! Center-point grid resampling.
//!
//! Each output pixel copies exactly one source pixel: the center of its grid
//! cell. No blending or interpolation happens, so antialiased block edges in
//! the source never leak into the result.

use log::{debug, warn};

use crate::error::GridError;
use crate::models::{Axis, GridParameters, OutputDimensions, ResultImage, SourceImage};

/// Resample `source` onto `out` using the cell centers of `grid`.
///
/// Output pixels beyond the whole cells available from the offset, or whose
/// center falls outside the source, stay transparent (`[0, 0, 0, 0]`).
/// Identical inputs always produce identical bytes.
pub fn resample(source: &SourceImage, grid: &GridParameters, out: OutputDimensions) -> ResultImage {
    let effective = grid.effective_cells(source.width(), source.height());
    debug!(
        "resampling {}x{} source with cell {} offset ({}, {}): {} cells into {}",
        source.width(),
        source.height(),
        grid.cell_size(),
        grid.offset_x(),
        grid.offset_y(),
        effective,
        out
    );

    let mut result = ResultImage::transparent(out.width(), out.height());

    let cols = effective.cols.min(out.width());
    let rows = effective.rows.min(out.height());

    for y in 0..rows {
        let src_y = grid.sample_coord(Axis::Y, y);
        if src_y >= source.height() as u64 {
            continue;
        }
        for x in 0..cols {
            let src_x = grid.sample_coord(Axis::X, x);
            if src_x >= source.width() as u64 {
                continue;
            }
            if let Some(rgba) = source.pixel(src_x as u32, src_y as u32) {
                result.put_pixel(x, y, rgba);
            }
        }
    }

    if cols < out.width() || rows < out.height() {
        warn!(
            "grid supplies only {} cells for {} output; the rest is left transparent",
            effective, out
        );
    }

    result
}

/// Resample from raw, untyped values.
///
/// Validates everything before sampling: non-positive sizes fail with
/// `InvalidDimension`, a non-positive cell or out-of-range offset with
/// `InvalidGrid`, and a wrong buffer length with `BufferSizeMismatch`.
pub fn resample_raw(
    width: i64,
    height: i64,
    pixels: Vec<u8>,
    cell_size: i64,
    offset_x: i64,
    offset_y: i64,
    output_width: i64,
    output_height: i64,
) -> Result<ResultImage, GridError> {
    let to_dim = |what: &'static str, v: i64| {
        u32::try_from(v).ok().filter(|&d| d > 0).ok_or(GridError::dimension(what, v))
    };
    let source = SourceImage::new(to_dim("width", width)?, to_dim("height", height)?, pixels)?;
    let grid = GridParameters::from_signed(cell_size, offset_x, offset_y)?;
    let out = OutputDimensions::from_signed(output_width, output_height)?;
    Ok(resample(&source, &grid, out))
}
