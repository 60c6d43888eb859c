use serde::{Deserialize, Serialize};

/// A single square of the board as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Always 0 on mines.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed
    }

    /// What a player should see for this cell.
    pub const fn view(self) -> CellView {
        match self {
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } => CellView::Mine,
            Cell {
                is_revealed: true,
                adjacent_mines,
                ..
            } => CellView::Revealed(adjacent_mines),
            Cell {
                is_flagged: true, ..
            } => CellView::Flagged,
            _ => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell, for presenters mapping cells to glyphs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}
