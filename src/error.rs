use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("{hazards} hazards do not fit a board of {cells} cells")]
    TooManyHazards { hazards: CellCount, cells: CellCount },
    #[error("Hazard coordinates {pos:?} are outside the board")]
    HazardOutOfBounds { pos: Coord2 },
}

pub type Result<T> = core::result::Result<T, GameError>;
