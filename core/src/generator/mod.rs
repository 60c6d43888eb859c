use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a new board.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
