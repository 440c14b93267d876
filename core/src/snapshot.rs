use alloc::collections::BTreeSet;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    /// Everything a renderer needs to know to draw one cell.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Currently exposed by the reveal sequence
        const FLASHING    = 1;
        /// In the player's selection
        const SELECTED    = 1 << 1;
        /// Selected but not a target
        const WRONG       = 1 << 2;
        /// Short press animation after a click
        const SELECTING   = 1 << 3;
        /// Part of the error flash after a lost attempt
        const ERROR_FLASH = 1 << 4;
        /// A target, only set when targets are visible in the snapshot
        const TARGET      = 1 << 5;
    }
}

/// Read-only view of the engine handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub level: Level,
    pub lives: Lives,
    pub grid_size: GridSize,
    /// Size of the target set, shown as "need to find N"
    pub target_count: CellCount,
    /// Only present while `Showing` or when debug reveal is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetSet>,
    pub selected: BTreeSet<CellIndex>,
    pub wrong_selected: BTreeSet<CellIndex>,
    pub mistakes: u8,
    pub flashing: BTreeSet<CellIndex>,
    pub reveal_phase: RevealPhase,
    pub selecting: BTreeSet<CellIndex>,
    pub error_flash: BTreeSet<CellIndex>,
}

impl Snapshot {
    pub fn total_cells(&self) -> CellCount {
        cell_count(self.grid_size)
    }

    pub fn cell_flags(&self, index: CellIndex) -> CellFlags {
        let mut flags = CellFlags::empty();
        flags.set(CellFlags::FLASHING, self.flashing.contains(&index));
        flags.set(CellFlags::SELECTED, self.selected.contains(&index));
        flags.set(CellFlags::WRONG, self.wrong_selected.contains(&index));
        flags.set(CellFlags::SELECTING, self.selecting.contains(&index));
        flags.set(CellFlags::ERROR_FLASH, self.error_flash.contains(&index));
        flags.set(
            CellFlags::TARGET,
            self.targets
                .as_ref()
                .is_some_and(|targets| targets.contains(&index)),
        );
        flags
    }

    /// Whether clicks should be forwarded at all.
    pub fn accepts_input(&self) -> bool {
        self.state.accepts_input()
    }
}
