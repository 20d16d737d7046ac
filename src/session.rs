//! Interactive alignment state for one decoded image.
//!
//! The session is the control layer between a user interface and the pure
//! core. It keeps the decoded source untouched, holds the grid and output
//! values the user is editing, and clamps each edit the way the alignment UI
//! does so the grid invariant always holds. Every [`AlignmentSession::process`]
//! call resamples from the original source.

use log::{debug, warn};

use crate::config::DefaultsConfig;
use crate::error::GridError;
use crate::estimate::{estimate, GridEstimate};
use crate::models::{Axis, EffectiveGrid, GridParameters, OutputDimensions, ResultImage, SourceImage};
use crate::resample::resample;

/// Editable grid and output state over an immutable source image.
#[derive(Debug, Clone)]
pub struct AlignmentSession {
    source: SourceImage,
    estimate: GridEstimate,
    grid: GridParameters,
    output: OutputDimensions,
    max_output: u32,
}

impl AlignmentSession {
    /// Open a session, seeding the grid and output from the estimator.
    ///
    /// When the estimator has no exact match, the output falls back to the
    /// configured default size.
    pub fn new(source: SourceImage, defaults: &DefaultsConfig) -> Result<Self, GridError> {
        let estimate = estimate(source.width(), source.height())?;
        let grid = GridParameters::unaligned(estimate.cell_size)?;
        let max_output = defaults.max_output.max(1);
        let guess = estimate.output_or(defaults.output());
        let output =
            OutputDimensions::new(guess.width().min(max_output), guess.height().min(max_output))?;
        debug!(
            "session for {}x{}: cell {}, output {}, max grid {}",
            source.width(),
            source.height(),
            grid.cell_size(),
            output,
            estimate.max_grid_size
        );

        Ok(Self { source, estimate, grid, output, max_output })
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// The estimate the session was opened with.
    pub fn estimate(&self) -> &GridEstimate {
        &self.estimate
    }

    pub fn grid(&self) -> GridParameters {
        self.grid
    }

    pub fn output(&self) -> OutputDimensions {
        self.output
    }

    /// Advisory cap for grid size input; not enforced here.
    pub fn max_grid_size(&self) -> u32 {
        self.estimate.max_grid_size
    }

    pub fn max_output(&self) -> u32 {
        self.max_output
    }

    /// Change the cell size. Values below 1 become 1 and any offset that no
    /// longer fits inside a cell is pulled back to `size - 1`.
    pub fn set_grid_size(&mut self, size: i64) -> GridParameters {
        let size = size.clamp(1, u32::MAX as i64) as u32;
        let fit = |offset: u32| if offset >= size { size - 1 } else { offset };
        let offset_x = fit(self.grid.offset_x());
        let offset_y = fit(self.grid.offset_y());
        if (offset_x, offset_y) != (self.grid.offset_x(), self.grid.offset_y()) {
            warn!("offsets pulled back to ({}, {}) for cell size {}", offset_x, offset_y, size);
        }
        self.grid = self.rebuild(size, offset_x, offset_y);
        self.grid
    }

    /// Change one offset, clamped into `0..cell_size`.
    pub fn set_offset(&mut self, axis: Axis, offset: i64) -> GridParameters {
        let max = self.grid.cell_size() as i64 - 1;
        let offset = offset.clamp(0, max) as u32;
        let (offset_x, offset_y) = match axis {
            Axis::X => (offset, self.grid.offset_y()),
            Axis::Y => (self.grid.offset_x(), offset),
        };
        self.grid = self.rebuild(self.grid.cell_size(), offset_x, offset_y);
        self.grid
    }

    /// Change the output size, each side clamped into `1..=max_output`.
    pub fn set_output(&mut self, width: i64, height: i64) -> OutputDimensions {
        let max = self.max_output as i64;
        let width = width.clamp(1, max) as u32;
        let height = height.clamp(1, max) as u32;
        self.output = OutputDimensions::new(width, height).unwrap_or(self.output);
        self.output
    }

    /// Whole cells available from the current offset.
    pub fn effective_cells(&self) -> EffectiveGrid {
        self.grid.effective_cells(self.source.width(), self.source.height())
    }

    /// Output pixels no whole cell reaches; these stay transparent.
    pub fn uncovered_pixels(&self) -> u64 {
        self.effective_cells().uncovered(self.output)
    }

    /// One-line description of the current grid and output.
    pub fn summary(&self) -> String {
        format!(
            "grid {}x{}px at offset ({}, {}), {} cells, output {}",
            self.grid.cell_size(),
            self.grid.cell_size(),
            self.grid.offset_x(),
            self.grid.offset_y(),
            self.effective_cells(),
            self.output
        )
    }

    /// Resample the original source with the current grid and output size.
    pub fn process(&self) -> ResultImage {
        resample(&self.source, &self.grid, self.output)
    }

    fn rebuild(&self, size: u32, offset_x: u32, offset_y: u32) -> GridParameters {
        // Callers clamp first, so the invariant holds and this never falls back.
        GridParameters::new(size, offset_x, offset_y).unwrap_or(self.grid)
    }
}
