use super::*;
use alloc::vec::Vec;
use rand::prelude::*;

/// Uniform sampling without replacement, seeded once per engine.
#[derive(Clone, Debug)]
pub struct RandomTargetGenerator {
    rng: SmallRng,
}

impl RandomTargetGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TargetGenerator for RandomTargetGenerator {
    fn generate(&mut self, grid_size: GridSize, count: CellCount) -> TargetSet {
        let total_cells = cell_count(grid_size);

        // always leave one cell free, a full board is nothing to memorize
        let limit = total_cells.saturating_sub(1);
        let count = if count > limit {
            log::warn!(
                "Too many targets requested, {} but only {} fit, clamping",
                count,
                limit
            );
            limit
        } else {
            count
        };

        // partial Fisher-Yates, only the first `count` slots get shuffled
        let mut cells: Vec<CellIndex> = (0..total_cells).collect();
        for i in 0..count {
            let j = self.rng.random_range(i..total_cells);
            cells.swap(usize::from(i), usize::from(j));
        }

        let targets: TargetSet = cells[..usize::from(count)].iter().copied().collect();
        debug_assert_eq!(targets.len(), usize::from(count));
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_targets() {
        let mut a = RandomTargetGenerator::new(7);
        let mut b = RandomTargetGenerator::new(7);

        for level in 1..10 {
            let grid = grid_size_for_level(level);
            let count = target_count(level, grid);
            assert_eq!(a.generate(grid, count), b.generate(grid, count));
        }
    }

    #[test]
    fn produces_exact_count_in_range() {
        let mut generator = RandomTargetGenerator::new(42);

        for _ in 0..200 {
            let targets = generator.generate(4, 9);
            assert_eq!(targets.len(), 9);
            assert!(targets.iter().all(|&cell| cell < 16));
        }
    }

    #[test]
    fn clamps_oversized_requests() {
        let mut generator = RandomTargetGenerator::new(1);

        assert_eq!(generator.generate(3, 20).len(), 8);
        assert!(generator.generate(1, 1).is_empty());
        assert!(generator.generate(0, 3).is_empty());
    }

    #[test]
    fn every_cell_gets_picked_eventually() {
        let mut generator = RandomTargetGenerator::new(3);
        let mut hits = [0u32; 9];

        for _ in 0..3000 {
            for cell in generator.generate(3, 3) {
                hits[usize::from(cell)] += 1;
            }
        }

        // each cell is expected 1000 times
        assert!(hits.iter().all(|&n| (800..1200).contains(&n)), "{:?}", hits);
    }
}
