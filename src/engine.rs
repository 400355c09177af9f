use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    GameOver,
    OutOfBounds,
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Flagged | Self::Unflagged)
    }
}

/// One cell newly revealed by a `reveal` call, with its final display state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealedCell {
    pub pos: Coord2,
    pub view: CellView,
}

/// Result of a single `reveal` call. The cell lists are complete sets: every
/// cell whose revealed state changed during the call appears exactly once, in
/// no particular order.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    GameOver,
    OutOfBounds,
    AlreadyResolved,
    Revealed(Vec<RevealedCell>),
    Won(Vec<RevealedCell>),
    HitHazard {
        struck: Coord2,
        exposed: Vec<RevealedCell>,
    },
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(
            self,
            Self::GameOver | Self::OutOfBounds | Self::AlreadyResolved
        )
    }

    /// Cells newly revealed by the call, empty for the no-op outcomes.
    pub fn cells(&self) -> &[RevealedCell] {
        match self {
            Self::GameOver | Self::OutOfBounds | Self::AlreadyResolved => &[],
            Self::Revealed(cells) | Self::Won(cells) => cells,
            Self::HitHazard { exposed, .. } => exposed,
        }
    }
}

/// Owned aggregate of the whole game: the laid-out grid, the reveal/flag
/// state and the win/loss status. All mutation goes through `reveal` and
/// `toggle_flag`; a call either completes its full unit of work or changes
/// nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    hazard_count: CellCount,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_hazard: Option<Coord2>,
}

impl Board {
    /// Generates a board with `config.hazards` uniformly random hazard cells.
    pub fn generate(config: BoardConfig, seed: u64) -> Result<Self> {
        RandomLayoutGenerator::new(seed).generate(config)
    }

    /// Builds a board with hazards at exactly the given positions.
    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &pos in hazard_coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::HazardOutOfBounds { pos });
            }
            hazard_mask[pos.to_nd_index()] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    /// Builds a board from a hazard mask, computing every cell's adjacency
    /// count. All construction funnels through here; no partially laid-out
    /// board is ever observable.
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Result<Self> {
        let dim = hazard_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(dim.0), Coord::try_from(dim.1)) else {
            return Err(GameError::InvalidDimensions {
                rows: dim.0,
                cols: dim.1,
            });
        };
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions {
                rows: dim.0,
                cols: dim.1,
            });
        }

        // the dimension check above bounds the count to CellCount
        let hazard_count = hazard_mask.iter().filter(|&&hazard| hazard).count() as CellCount;
        let total_cells = mult(rows, cols);
        if hazard_count >= total_cells {
            return Err(GameError::TooManyHazards {
                hazards: hazard_count,
                cells: total_cells,
            });
        }

        let cells = Array2::from_shape_fn(hazard_mask.raw_dim(), |(row, col)| {
            let pos = (row as Coord, col as Coord);
            let adjacent_hazards = hazard_mask
                .iter_neighbor_cells(pos)
                .filter(|&hazard| hazard)
                .count() as u8;
            Cell::new(hazard_mask[(row, col)], adjacent_hazards)
        });

        Ok(Self {
            cells,
            hazard_count,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            status: GameStatus::InProgress,
            triggered_hazard: None,
        })
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig::new_unchecked(rows, cols, self.hazard_count)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        // construction bounds both dimensions to Coord
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.hazard_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// How many hazards have not been flagged yet, negative when overflagged.
    pub fn hazards_left(&self) -> isize {
        (self.hazard_count as isize) - (self.flagged_count.0 as isize)
    }

    /// The hazard cell whose reveal lost the game, if any.
    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn in_bounds(&self, pos: Coord2) -> bool {
        let (rows, cols) = self.size();
        pos.0 < rows && pos.1 < cols
    }

    pub fn cell_at(&self, pos: Coord2) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells[pos.to_nd_index()])
    }

    pub fn view_at(&self, pos: Coord2) -> Option<CellView> {
        self.cell_at(pos).map(Cell::view)
    }

    /// Flips the flag on a hidden cell. Out-of-bounds positions, revealed
    /// cells and finished games are reported back without any mutation.
    pub fn toggle_flag(&mut self, pos: Coord2) -> FlagOutcome {
        use FlagOutcome::*;

        if self.status.is_finished() {
            return GameOver;
        }
        if !self.in_bounds(pos) {
            return OutOfBounds;
        }

        let cell = &mut self.cells[pos.to_nd_index()];
        if cell.is_revealed() {
            return NoChange;
        }

        if cell.is_flagged() {
            cell.set_flagged(false);
            self.flagged_count -= 1;
            log::debug!("unflagged {:?}", pos);
            Unflagged
        } else {
            cell.set_flagged(true);
            self.flagged_count += 1;
            log::debug!("flagged {:?}", pos);
            Flagged
        }
    }

    /// Reveals a hidden cell, flood-filling from it when its adjacency count
    /// is zero, and settles the game when it was a hazard or the last safe
    /// cell. Flagged cells are locked against reveal until unflagged.
    pub fn reveal(&mut self, pos: Coord2) -> RevealOutcome {
        if self.status.is_finished() {
            return RevealOutcome::GameOver;
        }
        if !self.in_bounds(pos) {
            return RevealOutcome::OutOfBounds;
        }

        let cell = self.cells[pos.to_nd_index()];
        if cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::AlreadyResolved;
        }

        self.cells[pos.to_nd_index()].mark_revealed();
        self.revealed_count += 1;

        if cell.is_hazard() {
            log::debug!("hazard struck at {:?}", pos);
            self.triggered_hazard = Some(pos);
            self.status = GameStatus::Lost;
            let exposed = self.expose_hazards(pos);
            return RevealOutcome::HitHazard {
                struck: pos,
                exposed,
            };
        }

        log::debug!(
            "revealed {:?}, adjacent hazards: {}",
            pos,
            cell.adjacent_hazards()
        );

        let mut revealed = Vec::new();
        revealed.push(RevealedCell {
            pos,
            view: self.cells[pos.to_nd_index()].view(),
        });

        if cell.adjacent_hazards() == 0 {
            self.flood_fill(pos, &mut revealed);
        }

        if self.revealed_count == Saturating(self.safe_cell_count()) {
            self.status = GameStatus::Won;
            log::debug!("all safe cells revealed, game won");
            RevealOutcome::Won(revealed)
        } else {
            RevealOutcome::Revealed(revealed)
        }
    }

    /// Iterative flood-fill from a zero-adjacency cell: reveals every hidden,
    /// unflagged neighbor, expanding only through cells that are themselves
    /// zero-adjacency. The revealed check doubles as the duplicate guard, so
    /// each cell is visited at most once and the loop is bounded by the board
    /// size.
    fn flood_fill(&mut self, start: Coord2, revealed: &mut Vec<RevealedCell>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_pos) = to_visit.pop_front() {
            for neighbor in self.cells.iter_neighbors(visit_pos) {
                let cell = self.cells[neighbor.to_nd_index()];
                if cell.is_revealed() || cell.is_flagged() {
                    continue;
                }

                self.cells[neighbor.to_nd_index()].mark_revealed();
                self.revealed_count += 1;

                // A hazard touched by the fill is exposed but never expanded
                // through and never ends the game.
                if cell.is_hazard() {
                    log::trace!("flood-fill exposed hazard at {:?}", neighbor);
                    revealed.push(RevealedCell {
                        pos: neighbor,
                        view: CellView::Hazard,
                    });
                    continue;
                }

                log::trace!(
                    "flood-fill revealed {:?}, adjacent hazards: {}",
                    neighbor,
                    cell.adjacent_hazards()
                );
                revealed.push(RevealedCell {
                    pos: neighbor,
                    view: self.cells[neighbor.to_nd_index()].view(),
                });

                if cell.adjacent_hazards() == 0 {
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    /// Marks every still-hidden hazard revealed after a loss, flagged ones
    /// included, so the renderer can show the full layout. Each exposure
    /// increments `revealed_count`: the counter always equals the number of
    /// revealed cells, on lost boards too.
    fn expose_hazards(&mut self, struck: Coord2) -> Vec<RevealedCell> {
        let mut exposed = Vec::with_capacity(usize::from(self.hazard_count));
        exposed.push(RevealedCell {
            pos: struck,
            view: CellView::Hazard,
        });

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                let cell = self.cells[pos.to_nd_index()];
                if cell.is_hazard() && !cell.is_revealed() {
                    self.cells[pos.to_nd_index()].mark_revealed();
                    self.revealed_count += 1;
                    exposed.push(RevealedCell {
                        pos,
                        view: CellView::Hazard,
                    });
                }
            }
        }

        exposed
    }
}
