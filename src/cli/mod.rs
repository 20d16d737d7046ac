//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod estimate;
mod fix;
mod grid;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxfixConfig};
use crate::models::Axis;
use crate::output::load_source;
use crate::session::AlignmentSession;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixelfix - Recover true-resolution pixel art from upscaled "fake pixel" images
#[derive(Parser)]
#[command(name = "pxfix")]
#[command(about = "Pixelfix - Recover true-resolution pixel art from upscaled \"fake pixel\" images")]
#[command(version)]
pub struct Cli {
    /// Path to a pxfix.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Grid adjustments shared by commands that sample or draw the grid
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Cell size in source pixels (default: estimated from image size)
    #[arg(short = 'g', long)]
    pub grid_size: Option<u32>,

    /// Horizontal grid offset in source pixels (clamped below the cell size)
    #[arg(short = 'x', long, default_value = "0")]
    pub offset_x: u32,

    /// Vertical grid offset in source pixels (clamped below the cell size)
    #[arg(short = 'y', long, default_value = "0")]
    pub offset_y: u32,

    /// Strict mode: reject out-of-range values instead of clamping them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Guess the grid cell size and output resolution of an image
    Estimate {
        /// Input image (PNG, JPEG, GIF, BMP, WebP)
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resample an upscaled image into true-resolution pixel art
    Fix {
        /// Input image (PNG, JPEG, GIF, BMP, WebP)
        input: PathBuf,

        /// Output file or directory.
        /// If omitted: {input}_pixel.png
        /// If directory (ends with /): dir/{input}_pixel.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Output width in logical pixels (default: estimated, else from config)
        #[arg(long)]
        width: Option<u32>,

        /// Output height in logical pixels (default: estimated, else from config)
        #[arg(long)]
        height: Option<u32>,

        /// Scale the saved image by an integer factor (1-64, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,

        /// Also write {input}_preview.png: the result upscaled with cell lines
        #[arg(long)]
        preview: bool,

        /// Scale factor for --preview (default: from config)
        #[arg(long)]
        preview_scale: Option<u32>,

        /// Largest allowed output side (default: from config, 256)
        #[arg(long)]
        max_output: Option<u32>,
    },
    /// Draw the sampling grid over the source image for alignment
    Grid {
        /// Input image (PNG, JPEG, GIF, BMP, WebP)
        input: PathBuf,

        /// Output file or directory.
        /// If omitted: {input}_grid.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Estimate { input, json } => estimate::run_estimate(&input, config_path, json),
        Commands::Fix {
            input,
            output,
            grid,
            width,
            height,
            scale,
            preview,
            preview_scale,
            max_output,
        } => {
            let overrides = CliOverrides { max_output, preview_scale };
            fix::run_fix(
                &input,
                output.as_deref(),
                config_path,
                &overrides,
                &grid,
                width,
                height,
                scale,
                preview,
            )
        }
        Commands::Grid { input, output, grid: grid_args } => {
            grid::run_grid(&input, output.as_deref(), config_path, &grid_args)
        }
    }
}

/// Load and merge configuration, reporting failures on stderr.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<PxfixConfig, ExitCode> {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    merge_cli_overrides(&mut config, overrides);

    // The file was validated on load, so anything left came from a flag
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            let flag = error.field.trim_start_matches("defaults.").replace('_', "-");
            eprintln!("Error: --{} {}", flag, error.message);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    Ok(config)
}

/// Decode `input` and open an alignment session seeded by the estimator.
pub(crate) fn open_session(
    input: &Path,
    config: &PxfixConfig,
) -> Result<AlignmentSession, ExitCode> {
    let source = match load_source(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    AlignmentSession::new(source, &config.defaults).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Apply grid flags to the session: size first, then offsets.
///
/// Lenient mode clamps like the interactive controls do. Strict mode rejects
/// any value the grid invariant does not allow.
pub(crate) fn apply_grid_args(session: &mut AlignmentSession, args: &GridArgs) -> Result<(), ExitCode> {
    let size = args.grid_size.unwrap_or(session.grid().cell_size());

    if args.strict {
        if size == 0 || args.offset_x >= size || args.offset_y >= size {
            eprintln!(
                "Error: grid size {} with offset ({}, {}) is invalid: offsets must be below the grid size",
                size, args.offset_x, args.offset_y
            );
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        if size > session.max_grid_size() {
            eprintln!(
                "Error: grid size {} exceeds the maximum of {} for this image",
                size,
                session.max_grid_size()
            );
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    }

    session.set_grid_size(size as i64);
    session.set_offset(Axis::X, args.offset_x as i64);
    session.set_offset(Axis::Y, args.offset_y as i64);
    Ok(())
}
