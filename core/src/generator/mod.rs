use crate::*;
use alloc::collections::BTreeSet;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Cells to memorize for one attempt.
pub type TargetSet = BTreeSet<CellIndex>;

pub trait TargetGenerator {
    /// Picks `count` distinct cells of a `grid_size`×`grid_size` board.
    fn generate(&mut self, grid_size: GridSize, count: CellCount) -> TargetSet;
}

impl<G: TargetGenerator + ?Sized> TargetGenerator for &mut G {
    fn generate(&mut self, grid_size: GridSize, count: CellCount) -> TargetSet {
        (**self).generate(grid_size, count)
    }
}
