use ndarray::Array2;

use super::*;

/// Purely random mine placement by rejection sampling of `(row, col)` pairs.
///
/// Boards that are more than half mines are built by sampling the safe cells instead and inverting, so sampling
/// never has to hit the last few free cells of a nearly full board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Draws a fresh seed from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        config.validate()?;

        let total_cells = config.total_cells();
        let inverted = config.mines > total_cells / 2;
        let to_place = if inverted {
            total_cells - config.mines
        } else {
            config.mines
        };

        log::debug!(
            "Generating {}x{} board with {} mines, seed {}",
            config.width,
            config.height,
            config.mines,
            self.seed
        );

        let mut marked: Array2<bool> = Array2::default(config.shape());
        let mut placed = 0;
        let mut draws: u64 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < to_place {
            let coords: Coord2 = (
                rng.random_range(0..config.height),
                rng.random_range(0..config.width),
            );
            draws += 1;
            let cell = &mut marked[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::trace!("Placed {} cells in {} draws", to_place, draws);

        if inverted {
            marked.mapv_inplace(|is_marked| !is_marked);
        }

        let layout = MineLayout::from_mine_mask(marked)?;
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(width: Coord, height: Coord, mines: CellCount, seed: u64) -> MineLayout {
        let config = GameConfig::new(width, height, mines).unwrap();
        RandomMinefieldGenerator::new(seed).generate(config).unwrap()
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..20 {
            for &(width, height, mines) in &[(1, 1, 0), (9, 9, 10), (16, 16, 40), (30, 16, 99), (7, 3, 0)] {
                let layout = generate(width, height, mines, seed);
                assert_eq!(layout.mine_count(), mines);
                assert_eq!(layout.width(), width);
                assert_eq!(layout.height(), height);
            }
        }
    }

    #[test]
    fn nearly_full_board_terminates() {
        let layout = generate(50, 40, 1999, 7);
        assert_eq!(layout.mine_count(), 1999);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(RandomMinefieldGenerator::new(42).seed(), 42);
        assert_eq!(generate(20, 12, 30, 42), generate(20, 12, 30, 42));
    }

    #[test]
    fn different_seeds_differ() {
        let layouts: Vec<_> = (0..5).map(|seed| generate(20, 20, 50, seed)).collect();
        assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = GameConfig::new_unchecked(4, 4, 16);
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config),
            Err(GameError::InvalidConfiguration {
                width: 4,
                height: 4,
                mines: 16
            })
        );
    }
}
