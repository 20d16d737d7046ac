//! Source and result pixel buffers.

use image::RgbaImage;

use crate::error::GridError;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded source image: dimensions plus a row-major RGBA buffer.
///
/// Immutable once constructed. Resampling only ever reads from it, so the same
/// source can be resampled any number of times with different grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SourceImage {
    /// Wrap a raw RGBA buffer.
    ///
    /// Fails with `InvalidDimension` if either dimension is zero and with
    /// `BufferSizeMismatch` if `pixels` is not exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::dimension("width", 0));
        }
        if height == 0 {
            return Err(GridError::dimension("height", 0));
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(GridError::BufferSizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Build a source from a decoded `image` buffer.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, GridError> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA quadruple at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Copy into an `image` buffer (for overlay drawing and encoding).
    pub fn to_rgba_image(&self) -> RgbaImage {
        // Dimensions and length are checked in `new`, so this always succeeds.
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

/// Output of a resample: a fresh RGBA buffer owned by the caller.
///
/// Pixels with no corresponding source cell stay at `[0, 0, 0, 0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ResultImage {
    /// A fully transparent image of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL] }
    }

    /// RGBA quadruple at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Convert into an `image` buffer for encoding or scaling.
    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        RgbaImage::from_raw(width, height, self.pixels)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}
