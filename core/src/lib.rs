//! Minesweeper board engine: mine placement, adjacency counts, flood-fill reveal
//! and win/loss tracking.
//!
//! The engine holds no global state. A presenter owns a [`Board`] (or a [`Game`]
//! session wrapping one), forwards clicks to [`Board::reveal`] and
//! [`Board::toggle_flag`], and re-renders from [`Board::view_at`] afterwards.
//!
//! ```
//! use minesweep_core::*;
//!
//! let layout = MineLayout::from_mine_coords(3, 3, &[(0, 0)]).unwrap();
//! let mut board = Board::from_layout(layout);
//!
//! assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::Won);
//! assert_eq!(board.status(), GameStatus::Won);
//! assert_eq!(board.view_at((0, 0)).unwrap(), CellView::Flagged);
//! ```

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod types;

/// Board dimensions and mine count requested by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Forces arbitrary input into a valid configuration, keeping at least one safe cell.
    pub fn clamped(width: Coord, height: Coord, mines: CellCount) -> Self {
        let width = width.clamp(1, Coord::MAX);
        let height = height.clamp(1, Coord::MAX);
        let mines = mines.min(mult(width, height) - 1);
        Self::new_unchecked(width, height, mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                mines: self.mines,
            })
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Array shape `(rows, cols)`.
    pub const fn shape(&self) -> [usize; 2] {
        [self.height as usize, self.width as usize]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 10)
    }
}

/// Where the mines are, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// `mine_mask` is indexed `[row, col]`.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let (rows, cols) = mine_mask.dim();
        let (Ok(height), Ok(width)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::InvalidBoardShape { rows, cols });
        };
        GameConfig::new(width, height, mine_count)?;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(width, height, 0)?;
        let mut mine_mask: Array2<bool> = Array2::default((height as usize, width as usize));

        for &coords in mine_coords {
            if coords.0 >= height || coords.1 >= width {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.height() && coords.1 < self.width() {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn width(&self) -> Coord {
        self.mine_mask.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the presenter needs to redraw.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether any cell changed, which is also the only way the status can change.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert!(matches!(
            GameConfig::new(0, 5, 0),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            GameConfig::new(5, 0, 0),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            GameConfig::new(3, 2, 6),
            Err(GameError::InvalidConfiguration {
                width: 3,
                height: 2,
                mines: 6
            })
        );
        assert!(GameConfig::new(3, 2, 5).is_ok());
        assert!(GameConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn clamped_always_validates() {
        assert_eq!(GameConfig::clamped(0, 0, 50), GameConfig::new_unchecked(1, 1, 0));
        assert_eq!(GameConfig::clamped(4, 4, 100), GameConfig::new_unchecked(4, 4, 15));
        assert!(GameConfig::clamped(Coord::MAX, 2, CellCount::MAX).validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::new(16, 9, 20).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"width":16,"height":9,"mines":20}"#);
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }

    #[test]
    fn layout_counts_neighbors() {
        let layout = MineLayout::from_mine_coords(4, 3, &[(0, 0), (1, 1), (2, 3)]).unwrap();

        assert_eq!(layout.width(), 4);
        assert_eq!(layout.height(), 3);
        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 9);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 3)), 0);
    }

    #[test]
    fn layout_rejects_bad_coords_and_full_boards() {
        assert_eq!(
            MineLayout::from_mine_coords(2, 2, &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert!(matches!(
            MineLayout::from_mine_coords(1, 2, &[(0, 0), (1, 0)]),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn layout_validates_coords() {
        let layout = MineLayout::from_mine_coords(5, 2, &[]).unwrap();
        assert_eq!(layout.validate_coords((1, 4)), Ok((1, 4)));
        assert_eq!(layout.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(layout.validate_coords((0, 5)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn oversized_mask_reports_its_shape() {
        let mask: Array2<bool> = Array2::default((1, 70_000));
        assert_eq!(
            MineLayout::from_mine_mask(mask),
            Err(GameError::InvalidBoardShape {
                rows: 1,
                cols: 70_000
            })
        );
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!MarkOutcome::NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());
        assert!(!RevealOutcome::NoChange.has_update());
        for outcome in [RevealOutcome::Revealed, RevealOutcome::HitMine, RevealOutcome::Won] {
            assert!(outcome.has_update());
        }
    }
}
