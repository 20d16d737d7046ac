//! Data models for source images, grids and results

mod grid;
mod image;

pub use self::grid::{Axis, EffectiveGrid, GridParameters, OutputDimensions};
pub use self::image::{ResultImage, SourceImage, BYTES_PER_PIXEL};
