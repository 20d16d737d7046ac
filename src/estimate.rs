//! Initial grid guess from image dimensions alone.
//!
//! The estimator assumes the source was produced by upscaling a square sprite
//! of one of the common logical sizes. It is a starting point for alignment,
//! not a detector: it never looks at pixel data and may guess wrong.

use log::debug;
use serde::Serialize;

use crate::error::GridError;
use crate::models::OutputDimensions;

/// Logical pixel counts tried in order. The first exact match wins, which
/// favors the smaller sprite size when several divide evenly.
pub const CANDIDATE_PIXEL_COUNTS: [u32; 5] = [8, 16, 32, 64, 128];

/// Logical size assumed when no candidate divides the image.
pub const FALLBACK_PIXEL_COUNT: u32 = 32;

/// Cell size used when the fallback division rounds down to zero.
pub const FALLBACK_CELL_SIZE: u32 = 32;

/// Result of [`estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridEstimate {
    /// Proposed cell size in source pixels
    pub cell_size: u32,
    /// Proposed output size, only set when a candidate matched exactly
    pub output: Option<OutputDimensions>,
    /// Advisory cap for manual grid-size input
    pub max_grid_size: u32,
}

impl GridEstimate {
    /// True when a candidate pixel count divided both dimensions evenly.
    pub fn is_exact(&self) -> bool {
        self.output.is_some()
    }

    /// Output size to use: the estimate if exact, otherwise `prior` unchanged.
    pub fn output_or(&self, prior: OutputDimensions) -> OutputDimensions {
        self.output.unwrap_or(prior)
    }
}

/// Propose a cell size and output resolution for a `width x height` image.
///
/// Both dimensions must be positive. The output is always square, even for
/// non-square images, and the fallback only looks at `width`.
pub fn estimate(width: u32, height: u32) -> Result<GridEstimate, GridError> {
    if width == 0 {
        return Err(GridError::dimension("width", 0));
    }
    if height == 0 {
        return Err(GridError::dimension("height", 0));
    }

    let max_grid_size = max_grid_size(width);

    for n in CANDIDATE_PIXEL_COUNTS {
        if width % n != 0 || height % n != 0 {
            continue;
        }
        let cell_size = width / n;
        if cell_size == height / n {
            debug!("{}x{} matches {}x{} logical pixels at cell size {}", width, height, n, n, cell_size);
            return Ok(GridEstimate {
                cell_size,
                output: Some(OutputDimensions::square(n)?),
                max_grid_size,
            });
        }
    }

    let guess = width / FALLBACK_PIXEL_COUNT;
    let cell_size = if guess > 0 { guess } else { FALLBACK_CELL_SIZE };
    debug!("{}x{} has no exact match, falling back to cell size {}", width, height, cell_size);

    Ok(GridEstimate { cell_size, output: None, max_grid_size })
}

/// Signed entry point for untyped callers; zero or negative sizes are rejected.
pub fn estimate_signed(width: i64, height: i64) -> Result<GridEstimate, GridError> {
    let width = u32::try_from(width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or(GridError::dimension("width", width))?;
    let height = u32::try_from(height)
        .ok()
        .filter(|&h| h > 0)
        .ok_or(GridError::dimension("height", height))?;
    estimate(width, height)
}

/// `max(4, ceil(width / 4))`
pub fn max_grid_size(width: u32) -> u32 {
    width.div_ceil(4).max(4)
}
