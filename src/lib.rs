//! Pixelfix - Recover true-resolution pixel art from upscaled "fake pixel" images
//!
//! Image generators often produce pixel art as a large raster where every
//! logical pixel is a blurry block of real pixels. This library:
//! - Estimates the block (cell) size and logical resolution from image size
//! - Resamples one color per cell at the cell center
//! - Keeps per-image alignment state with the clamping rules of an editor UI
//! - Draws grid overlays for checking alignment
//!
//! The core ([`estimate`], [`resample`]) is pure and synchronous; decoding,
//! encoding, configuration and the `pxfix` binary sit around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod models;
pub mod output;
pub mod overlay;
pub mod resample;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::GridError;
pub use estimate::{estimate, GridEstimate};
pub use models::{EffectiveGrid, GridParameters, OutputDimensions, ResultImage, SourceImage};
pub use resample::{resample, resample_raw};
pub use session::AlignmentSession;
