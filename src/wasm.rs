//! WASM API module for browser/JS interop
//!
//! Exposes the estimator and resampler over raw RGBA buffers, which is what
//! a canvas `ImageData` hands over.

use wasm_bindgen::prelude::*;

use crate::estimate::estimate_signed;
use crate::resample::resample_raw;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Grid guess for an image size.
#[wasm_bindgen]
pub struct EstimateResult {
    cell_size: u32,
    output_width: Option<u32>,
    output_height: Option<u32>,
    max_grid_size: u32,
}

#[wasm_bindgen]
impl EstimateResult {
    /// Estimated cell size in source pixels
    #[wasm_bindgen(getter, js_name = cellSize)]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Logical output width, or `undefined` when no candidate matched
    #[wasm_bindgen(getter, js_name = outputWidth)]
    pub fn output_width(&self) -> Option<u32> {
        self.output_width
    }

    /// Logical output height, or `undefined` when no candidate matched
    #[wasm_bindgen(getter, js_name = outputHeight)]
    pub fn output_height(&self) -> Option<u32> {
        self.output_height
    }

    /// Upper bound for a grid size input
    #[wasm_bindgen(getter, js_name = maxGridSize)]
    pub fn max_grid_size(&self) -> u32 {
        self.max_grid_size
    }

    /// Whether a candidate resolution divided the image exactly
    #[wasm_bindgen(getter)]
    pub fn exact(&self) -> bool {
        self.output_width.is_some()
    }
}

/// Result of resampling to RGBA pixels.
#[wasm_bindgen]
pub struct ResampleResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl ResampleResult {
    /// Width of the result in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the result in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

/// Guess the cell size and logical resolution of an image.
///
/// # Arguments
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
///
/// # Returns
/// EstimateResult, or an error string for non-positive sizes
#[wasm_bindgen]
pub fn estimate_grid(width: i32, height: i32) -> Result<EstimateResult, JsValue> {
    let estimate =
        estimate_signed(width as i64, height as i64).map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(EstimateResult {
        cell_size: estimate.cell_size,
        output_width: estimate.output.map(|o| o.width()),
        output_height: estimate.output.map(|o| o.height()),
        max_grid_size: estimate.max_grid_size,
    })
}

/// Resample an RGBA buffer into an `output_width` x `output_height` image.
///
/// Cells past the available source stay fully transparent.
#[wasm_bindgen]
pub fn resample_rgba(
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    cell_size: i32,
    offset_x: i32,
    offset_y: i32,
    output_width: i32,
    output_height: i32,
) -> Result<ResampleResult, JsValue> {
    let result = resample_raw(
        width as i64,
        height as i64,
        pixels,
        cell_size as i64,
        offset_x as i64,
        offset_y as i64,
        output_width as i64,
        output_height as i64,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(ResampleResult { width: result.width, height: result.height, pixels: result.pixels })
}
