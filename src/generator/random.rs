use ndarray::Array2;

use super::*;

/// Seeded placement strategy that rejection-samples uniform positions until
/// the requested number of distinct cells is hazardous.
///
/// Convergence slows as the hazard count approaches the cell count; callers
/// that care about generation time should keep it well below full.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;

        let mut hazard_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < config.hazards {
            let pos: Coord2 = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            let cell = &mut hazard_mask[pos.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!(
            "placed {} hazards on a {}x{} board with seed {}",
            placed,
            config.rows,
            config.cols,
            self.seed
        );
        Board::from_hazard_mask(hazard_mask)
    }
}
