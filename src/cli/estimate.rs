//! Estimate command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{open_session, resolve_config, EXIT_SUCCESS};
use crate::config::CliOverrides;

/// Execute the estimate command
pub fn run_estimate(input: &Path, config_path: Option<&Path>, json: bool) -> ExitCode {
    let config = match resolve_config(config_path, &CliOverrides::default()) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let session = match open_session(input, &config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let source = session.source();
    let estimate = session.estimate();
    let output = session.output();
    let cells = session.effective_cells();

    if json {
        let report = serde_json::json!({
            "input": input.display().to_string(),
            "width": source.width(),
            "height": source.height(),
            "cell_size": estimate.cell_size,
            "exact": estimate.is_exact(),
            "output_width": output.width(),
            "output_height": output.height(),
            "max_grid_size": estimate.max_grid_size,
            "effective_cols": cells.cols,
            "effective_rows": cells.rows,
        });
        println!("{}", report);
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("{} ({}x{})", input.display(), source.width(), source.height());
    println!("  Cell size: {}px", estimate.cell_size);
    if estimate.is_exact() {
        println!("  Output: {}", output);
    } else {
        println!("  Output: {} (default, no exact match)", output);
    }
    println!("  Cells: {}", cells);
    println!("  Max grid size: {}", estimate.max_grid_size);

    ExitCode::from(EXIT_SUCCESS)
}
