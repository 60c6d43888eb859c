use serde::{Deserialize, Serialize};

use crate::*;

/// A play session: the settings for the next "new game" plus the current board, if any.
///
/// This is the state a presenter keeps between gestures. Settings can change at any time and only take effect on
/// the next [`Game::start_new_game`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Option<Board>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Stores settings for the next board. Invalid settings are rejected and the previous ones kept.
    pub fn set_config(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.board
            .as_ref()
            .map_or(GameStatus::NotStarted, Board::status)
    }

    /// Replaces the current board, whatever its state, with a freshly generated one.
    pub fn start_new_game(&mut self) -> Result<&Board> {
        let board = Board::generate(self.config)?;
        Ok(self.install(board))
    }

    pub fn start_new_game_seeded(&mut self, seed: u64) -> Result<&Board> {
        let board = Board::generate_seeded(self.config, seed)?;
        Ok(self.install(board))
    }

    /// Starts a game on a fixed layout, adopting its dimensions and mine count as the current settings.
    pub fn start_with_layout(&mut self, mine_layout: MineLayout) -> &Board {
        self.config = mine_layout.game_config();
        self.install(Board::from_layout(mine_layout))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        match &mut self.board {
            Some(board) => board.reveal(coords),
            None => Ok(RevealOutcome::NoChange),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        match &mut self.board {
            Some(board) => board.toggle_flag(coords),
            None => Ok(MarkOutcome::NoChange),
        }
    }

    fn install(&mut self, board: Board) -> &Board {
        if let Some(previous) = &self.board {
            log::debug!("Replacing board in state {:?}", previous.status());
        }
        self.board.insert(board)
    }
}
