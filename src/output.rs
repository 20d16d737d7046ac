//! Image decoding, PNG output and file path generation

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::GridError;
use crate::models::SourceImage;

/// Error type for input/output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
    /// Decoded image cannot be used as a source
    Grid(GridError),
    /// Scaled dimensions do not fit in `u32`
    TooLarge { width: u32, height: u32, factor: u32 },
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::Grid(e) => write!(f, "{}", e),
            OutputError::TooLarge { width, height, factor } => {
                write!(f, "Cannot scale {}x{} by {}: result is too large", width, height, factor)
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::Grid(e) => Some(e),
            OutputError::TooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

impl From<GridError> for OutputError {
    fn from(e: GridError) -> Self {
        OutputError::Grid(e)
    }
}

/// Decode any format supported by `image` into an RGBA source.
pub fn load_source(path: &Path) -> Result<SourceImage, OutputError> {
    let image = image::open(path)?.to_rgba8();
    log::debug!("decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(SourceImage::from_rgba_image(image)?)
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Factors of 0 and 1 return the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (width, height) = image.dimensions();
    match (width.checked_mul(factor), height.checked_mul(factor)) {
        (Some(w), Some(h)) => Ok(image::imageops::resize(&image, w, h, FilterType::Nearest)),
        _ => Err(OutputError::TooLarge { width, height, factor }),
    }
}

/// Generate the output path for a derived image.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}_{suffix}.png` next to the input |
/// | `-o dir/` (or an existing directory) | `dir/{input_stem}_{suffix}.png` |
/// | `-o out.png` | `out.png` |
pub fn generate_output_path(input: &Path, suffix: &str, output_arg: Option<&Path>) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.png", input_stem, suffix);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}

/// Path for a secondary image written alongside `primary`.
///
/// Lands in the same directory as `primary` and is named after the input:
/// `{input_stem}_{suffix}.png`.
pub fn companion_output_path(input: &Path, suffix: &str, primary: &Path) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.png", input_stem, suffix);
    match primary.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
