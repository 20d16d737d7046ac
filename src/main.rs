//! Pixelfix - Command-line tool for turning upscaled "fake pixel" images into real pixel art

use std::process::ExitCode;

use pixelfix::cli;

fn main() -> ExitCode {
    env_logger::init();
    cli::run()
}
