use super::*;
use alloc::collections::VecDeque;

/// Replays prepared target sets in order, then falls back to random sampling.
///
/// Meant for tests and reproducible demos. Cells outside the board are dropped,
/// oversized sets are cut down to `count` and short sets are topped up with
/// random cells, so every set keeps at least one free cell.
#[derive(Clone, Debug)]
pub struct ScriptedTargetGenerator {
    script: VecDeque<TargetSet>,
    fallback: RandomTargetGenerator,
}

impl ScriptedTargetGenerator {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = CellIndex>,
    {
        Self {
            script: script
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            fallback: RandomTargetGenerator::new(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TargetGenerator for ScriptedTargetGenerator {
    fn generate(&mut self, grid_size: GridSize, count: CellCount) -> TargetSet {
        let Some(mut targets) = self.script.pop_front() else {
            return self.fallback.generate(grid_size, count);
        };

        let total_cells = cell_count(grid_size);
        let before = targets.len();
        targets.retain(|&cell| cell < total_cells);
        if targets.len() != before {
            log::warn!(
                "Dropped {} scripted targets outside a {}x{} board",
                before - targets.len(),
                grid_size,
                grid_size
            );
        }

        let wanted = usize::from(count.min(total_cells.saturating_sub(1)));
        if targets.len() > wanted {
            log::warn!("Scripted {} targets, keeping {}", targets.len(), wanted);
            targets = targets.into_iter().take(wanted).collect();
        } else if targets.len() < wanted {
            log::warn!(
                "Scripted {} targets, topping up to {}",
                targets.len(),
                wanted
            );
            // the fallback draws `wanted` distinct cells, enough to fill any gap
            let extra = self.fallback.generate(grid_size, count);
            let missing = wanted - targets.len();
            let extra: TargetSet = extra.difference(&targets).copied().take(missing).collect();
            targets.extend(extra);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_then_falls_back() {
        let mut generator = ScriptedTargetGenerator::new([[1, 4, 7]]);

        assert_eq!(generator.generate(3, 3), TargetSet::from([1, 4, 7]));
        assert_eq!(generator.remaining(), 0);
        assert_eq!(generator.generate(3, 4).len(), 4);
    }

    #[test]
    fn drops_cells_off_the_board() {
        let mut generator = ScriptedTargetGenerator::new([[0, 8, 9, 30]]);

        let targets = generator.generate(3, 3);
        assert_eq!(targets.len(), 3);
        assert!(targets.contains(&0));
        assert!(targets.contains(&8));
        assert!(targets.iter().all(|&cell| cell < 9));
    }

    #[test]
    fn full_board_script_leaves_a_free_cell() {
        let mut generator = ScriptedTargetGenerator::new([0..=8]);

        assert_eq!(generator.generate(3, 3), TargetSet::from([0, 1, 2]));
    }

    #[test]
    fn oversized_count_is_capped_below_board_size() {
        let mut generator = ScriptedTargetGenerator::new([0..=8]);

        let targets = generator.generate(3, 20);
        assert_eq!(targets.len(), 8);
        assert!(targets.iter().all(|&cell| cell < 9));
    }

    #[test]
    fn short_script_is_topped_up() {
        let mut generator = ScriptedTargetGenerator::new([[5]]);

        let targets = generator.generate(4, 6);
        assert_eq!(targets.len(), 6);
        assert!(targets.contains(&5));
        assert!(targets.iter().all(|&cell| cell < 16));
    }
}
