/// Side length of the square board.
pub type GridSize = u8;

/// Linear index of a cell, row-major, in `0..grid_size²`.
pub type CellIndex = u16;

/// Count type used for cell totals and target-set sizes.
pub type CellCount = u16;

/// Level counter, starts at 1.
pub type Level = u32;

/// Remaining lives, in `0..=MAX_LIVES`.
pub type Lives = u8;

/// Total number of cells on a board with the given side length.
pub const fn cell_count(grid_size: GridSize) -> CellCount {
    let side = grid_size as CellCount;
    side.saturating_mul(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_count_is_square() {
        assert_eq!(cell_count(3), 9);
        assert_eq!(cell_count(6), 36);
    }
}
