//! Fix command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{apply_grid_args, open_session, resolve_config, GridArgs};
use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::output::{companion_output_path, generate_output_path, save_png, scale_image};
use crate::overlay::draw_preview_grid;

/// Execute the fix command
pub fn run_fix(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    grid_args: &GridArgs,
    width: Option<u32>,
    height: Option<u32>,
    scale: u32,
    preview: bool,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut session = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    if let Err(code) = apply_grid_args(&mut session, grid_args) {
        return code;
    }

    // Explicit sizes win over an exact estimate
    if width.is_some() || height.is_some() {
        let width = width.unwrap_or(session.output().width());
        let height = height.unwrap_or(session.output().height());
        let max = session.max_output();
        if grid_args.strict && (width == 0 || height == 0 || width > max || height > max) {
            eprintln!("Error: output size {}x{} must be between 1 and {} on each side", width, height, max);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        session.set_output(width as i64, height as i64);
    }

    println!("{}", session.summary());

    let uncovered = session.uncovered_pixels();
    if uncovered > 0 {
        let out = session.output();
        eprintln!(
            "Warning: {} of {} output pixels have no source cell and were left transparent",
            uncovered,
            out.width() as u64 * out.height() as u64
        );
    }

    let result = session.process();
    let output_path = generate_output_path(input, "pixel", output);

    if preview {
        let preview_path = companion_output_path(input, "preview", &output_path);
        let saved =
            draw_preview_grid(&result, config.defaults.preview_scale, config.overlay.preview_color)
                .and_then(|image| save_png(&image, &preview_path));
        if let Err(e) = saved {
            eprintln!("Error: Failed to save '{}': {}", preview_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", preview_path.display());
    }

    let saved =
        scale_image(result.into_rgba_image(), scale).and_then(|image| save_png(&image, &output_path));
    if let Err(e) = saved {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
