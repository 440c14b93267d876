//! Level progression: how big the board is and how many cells flash.

use crate::*;

/// Board side length at level 1.
pub const MIN_GRID_SIZE: GridSize = 3;

/// Board side length never grows past this.
pub const MAX_GRID_SIZE: GridSize = 6;

/// Levels spent on each grid size before it grows.
pub const LEVELS_PER_GRID_STEP: Level = 3;

/// Hard cap on the target-set size, regardless of board area.
pub const MAX_TARGETS: CellCount = 25;

/// Lives at the start of a game.
pub const MAX_LIVES: Lives = 3;

/// Mistakes within one attempt that cost a life.
pub const MAX_MISTAKES: u8 = 3;

/// Step function of the level: 3 for levels 1-2, then one more every three
/// levels up to [`MAX_GRID_SIZE`].
pub fn grid_size_for_level(level: Level) -> GridSize {
    let steps = level / LEVELS_PER_GRID_STEP;
    let max_steps = Level::from(MAX_GRID_SIZE - MIN_GRID_SIZE);
    // bounded by max_steps, so the cast can't truncate
    MIN_GRID_SIZE + steps.min(max_steps) as GridSize
}

/// Number of targets for `level` on a board of `grid_size`, always leaving at
/// least one cell that is not a target.
pub fn target_count(level: Level, grid_size: GridSize) -> CellCount {
    let wanted = CellCount::try_from(level.saturating_add(2)).unwrap_or(CellCount::MAX);
    let available = cell_count(grid_size).saturating_sub(1).max(1);
    wanted.min(available).min(MAX_TARGETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_grows_every_three_levels() {
        let sizes: alloc::vec::Vec<_> = (1..=12).map(grid_size_for_level).collect();
        assert_eq!(sizes, [3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 6]);
        assert_eq!(grid_size_for_level(Level::MAX), MAX_GRID_SIZE);
    }

    #[test]
    fn target_count_follows_level_until_capped() {
        assert_eq!(target_count(1, grid_size_for_level(1)), 3);
        assert_eq!(target_count(2, grid_size_for_level(2)), 4);
        assert_eq!(target_count(7, 3), 8);
        assert_eq!(target_count(40, 6), MAX_TARGETS);
        assert_eq!(target_count(Level::MAX, MAX_GRID_SIZE), MAX_TARGETS);
    }

    #[test]
    fn target_count_on_degenerate_board_is_one() {
        assert_eq!(target_count(5, 1), 1);
    }
}
