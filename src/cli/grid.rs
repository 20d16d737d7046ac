//! Grid command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{apply_grid_args, open_session, resolve_config, GridArgs};
use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::output::{generate_output_path, save_png};
use crate::overlay::draw_grid_overlay;

/// Execute the grid command
pub fn run_grid(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    grid_args: &GridArgs,
) -> ExitCode {
    let config = match resolve_config(config_path, &CliOverrides::default()) {
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

    let image = draw_grid_overlay(session.source(), &session.grid(), config.overlay.grid_color);
    let output_path = generate_output_path(input, "grid", output);
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("{}", session.summary());
    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
