use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board has been generated yet.
    #[default]
    NotStarted,
    Ongoing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The grid and its game status.
///
/// A board is created wholesale for each new game and only mutated in place by [`Board::reveal`] and
/// [`Board::toggle_flag`]. Cells are stored row-major, indexed `[row, col]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Generates a random board using a fresh seed.
    pub fn generate(config: GameConfig) -> Result<Self> {
        Self::generate_with(RandomMinefieldGenerator::from_entropy(), config)
    }

    pub fn generate_seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate_with(RandomMinefieldGenerator::new(seed), config)
    }

    pub fn generate_with(generator: impl MinefieldGenerator, config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_layout(generator.generate(config)?))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let cells = Array2::from_shape_fn(
            mine_layout.game_config().shape(),
            |(row, col)| {
                let coords = (row as Coord, col as Coord);
                let is_mine = mine_layout.contains_mine(coords);
                Cell {
                    is_mine,
                    adjacent_mines: if is_mine {
                        0
                    } else {
                        mine_layout.adjacent_mine_count(coords)
                    },
                    ..Default::default()
                }
            },
        );

        Self {
            cells,
            mine_count: mine_layout.mine_count(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            status: GameStatus::Ongoing,
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count.0)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell_at(coords).map(Cell::view)
    }

    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        self.cell_at(coords).map(|cell| cell.is_mine)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.height() && coords.1 < self.width() {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if !self.status.is_ongoing() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if !self.status.is_ongoing() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            self.triggered_mine = Some(coords);
            self.expose_mines();
            self.status = GameStatus::Lost;
            log::debug!("Mine hit at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(coords);

        if self.all_safe_revealed() {
            self.flag_all_mines();
            self.status = GameStatus::Won;
            log::debug!("Board cleared");
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals `start` and spreads through zero-count cells.
    ///
    /// Flagged cells reached through a zero-count neighbor are revealed as well, losing their flag.
    fn flood_reveal(&mut self, start: Coord2) {
        let width = self.width();
        let before = self.revealed_count;
        let mut to_visit = vec![flat_index(start, width)];

        while let Some(index) = to_visit.pop() {
            let coords = from_flat_index(index, width);
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.is_revealed {
                continue;
            }

            cell.is_revealed = true;
            if cell.is_flagged {
                cell.is_flagged = false;
                self.flagged_count -= 1;
            }
            self.revealed_count += 1;

            if cell.adjacent_mines == 0 {
                to_visit.extend(
                    self.cells
                        .iter_neighbors(coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_unrevealed())
                        .map(|pos| flat_index(pos, width)),
                );
            }
        }

        log::trace!(
            "Revealed {} cells from {:?}",
            (self.revealed_count - before).0,
            start
        );
    }

    fn all_safe_revealed(&self) -> bool {
        self.revealed_count.0 >= self.game_config().safe_cell_count()
    }

    fn expose_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }

    fn flag_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_flagged = true;
        }
        self.flagged_count =
            Saturating(self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount);
    }
}
