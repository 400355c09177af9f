#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Dimensions and hazard count a board is laid out from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub hazards: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, hazards: CellCount) -> Self {
        Self { rows, cols, hazards }
    }

    pub fn new(rows: Coord, cols: Coord, hazards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, hazards);
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config describes a playable board: both dimensions
    /// nonzero and at least one safe cell. Invalid configs are rejected
    /// rather than clamped.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions {
                rows: self.rows as usize,
                cols: self.cols as usize,
            });
        }
        if self.hazards >= self.total_cells() {
            return Err(GameError::TooManyHazards {
                hazards: self.hazards,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }

    pub const fn beginner() -> Self {
        Self { rows: 9, cols: 9, hazards: 10 }
    }

    pub const fn intermediate() -> Self {
        Self { rows: 16, cols: 16, hazards: 40 }
    }

    pub const fn expert() -> Self {
        Self { rows: 16, cols: 30, hazards: 99 }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::intermediate()
    }
}
