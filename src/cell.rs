use serde::{Deserialize, Serialize};

/// Per-position record: layout facts fixed at generation time plus the
/// reveal/flag state that changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    hazard: bool,
    revealed: bool,
    flagged: bool,
    adjacent_hazards: u8,
}

impl Cell {
    pub(crate) const fn new(hazard: bool, adjacent_hazards: u8) -> Self {
        Self {
            hazard,
            revealed: false,
            flagged: false,
            adjacent_hazards,
        }
    }

    pub const fn is_hazard(self) -> bool {
        self.hazard
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Hazard count of the in-bounds Moore neighborhood, in `0..=8`.
    pub const fn adjacent_hazards(self) -> u8 {
        self.adjacent_hazards
    }

    pub const fn view(self) -> CellView {
        if self.revealed {
            if self.hazard {
                CellView::Hazard
            } else if self.adjacent_hazards > 0 {
                CellView::Numbered(self.adjacent_hazards)
            } else {
                CellView::Blank
            }
        } else if self.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    pub(crate) fn mark_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}

/// Player-visible display state of a cell, for the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Blank,
    Numbered(u8),
    Hazard,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tracks_reveal_and_flag_state() {
        let mut cell = Cell::new(false, 3);
        assert_eq!(cell.view(), CellView::Hidden);

        cell.set_flagged(true);
        assert_eq!(cell.view(), CellView::Flagged);

        cell.mark_revealed();
        assert_eq!(cell.view(), CellView::Numbered(3));
    }

    #[test]
    fn revealed_hazard_shows_hazard_even_when_flagged() {
        let mut cell = Cell::new(true, 0);
        cell.set_flagged(true);
        cell.mark_revealed();

        assert_eq!(cell.view(), CellView::Hazard);
        assert!(!cell.view().is_closed());
    }

    #[test]
    fn blank_view_requires_zero_adjacency() {
        let mut cell = Cell::new(false, 0);
        cell.mark_revealed();

        assert_eq!(cell.view(), CellView::Blank);
    }
}
