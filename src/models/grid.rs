//! Grid alignment and output size types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Axis selector for offset adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Size and origin of the sampling grid, in source pixels.
///
/// Invariant: `cell_size >= 1` and both offsets are `< cell_size`. An offset of
/// a whole cell or more is the same grid with one fewer leading partial cell,
/// so it is rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridParameters {
    cell_size: u32,
    offset_x: u32,
    offset_y: u32,
}

impl GridParameters {
    pub fn new(cell_size: u32, offset_x: u32, offset_y: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            return Err(GridError::grid("cell_size must be at least 1"));
        }
        if offset_x >= cell_size {
            return Err(GridError::grid(format!(
                "offset_x {} must be less than cell_size {}",
                offset_x, cell_size
            )));
        }
        if offset_y >= cell_size {
            return Err(GridError::grid(format!(
                "offset_y {} must be less than cell_size {}",
                offset_y, cell_size
            )));
        }
        Ok(Self { cell_size, offset_x, offset_y })
    }

    /// Validate signed values as they arrive from JS or other untyped callers.
    pub fn from_signed(cell_size: i64, offset_x: i64, offset_y: i64) -> Result<Self, GridError> {
        if cell_size <= 0 {
            return Err(GridError::grid(format!("cell_size {} must be at least 1", cell_size)));
        }
        if offset_x < 0 || offset_y < 0 {
            return Err(GridError::grid(format!(
                "offsets ({}, {}) must not be negative",
                offset_x, offset_y
            )));
        }
        let to_u32 = |v: i64| u32::try_from(v).map_err(|_| GridError::grid(format!("{} is too large", v)));
        Self::new(to_u32(cell_size)?, to_u32(offset_x)?, to_u32(offset_y)?)
    }

    /// Unaligned grid: `cell_size` with both offsets at zero.
    pub fn unaligned(cell_size: u32) -> Result<Self, GridError> {
        Self::new(cell_size, 0, 0)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    pub fn offset(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.offset_x,
            Axis::Y => self.offset_y,
        }
    }

    /// Whole cells that fit in a `width x height` image starting at the offset.
    ///
    /// An offset past the image edge yields zero cells on that axis.
    pub fn effective_cells(&self, width: u32, height: u32) -> EffectiveGrid {
        EffectiveGrid {
            cols: width.saturating_sub(self.offset_x) / self.cell_size,
            rows: height.saturating_sub(self.offset_y) / self.cell_size,
        }
    }

    /// Source coordinate sampled for output index `i` on `axis`: the cell center.
    pub fn sample_coord(&self, axis: Axis, i: u32) -> u64 {
        i as u64 * self.cell_size as u64 + self.offset(axis) as u64 + (self.cell_size / 2) as u64
    }
}

/// Number of whole grid cells available from the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveGrid {
    pub cols: u32,
    pub rows: u32,
}

impl EffectiveGrid {
    /// Output pixels of `out` that no whole cell reaches.
    ///
    /// Counted from the grid alone, so a cell sampled from a transparent
    /// source pixel still counts as covered.
    pub fn uncovered(&self, out: OutputDimensions) -> u64 {
        let total = out.width() as u64 * out.height() as u64;
        let covered = self.cols.min(out.width()) as u64 * self.rows.min(out.height()) as u64;
        total - covered
    }
}

impl fmt::Display for EffectiveGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Requested resolution of the recovered image.
///
/// The core places no upper bound on either side; caps belong to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputDimensions {
    width: u32,
    height: u32,
}

impl OutputDimensions {
    /// 32x32, the size assumed before anything is known about the image
    pub const DEFAULT: OutputDimensions = OutputDimensions { width: 32, height: 32 };

    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::dimension("output width", 0));
        }
        if height == 0 {
            return Err(GridError::dimension("output height", 0));
        }
        Ok(Self { width, height })
    }

    /// Square output of `n x n` logical pixels.
    pub fn square(n: u32) -> Result<Self, GridError> {
        Self::new(n, n)
    }

    pub fn from_signed(width: i64, height: i64) -> Result<Self, GridError> {
        let check = |what: &'static str, v: i64| {
            if v <= 0 {
                return Err(GridError::dimension(what, v));
            }
            u32::try_from(v).map_err(|_| GridError::dimension(what, v))
        };
        Self::new(check("output width", width)?, check("output height", height)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for OutputDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
