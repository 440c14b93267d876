#![no_std]

extern crate alloc;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use rules::*;
pub use schedule::*;
pub use snapshot::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod reveal;
mod rules;
mod schedule;
mod snapshot;
mod types;

/// Outcome of a square selection
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    /// A target cell was added
    Selected,
    /// A cell was toggled off
    Deselected,
    /// A wrong cell was added, attempt still running
    Mistake,
    /// Third mistake, a life was lost and a retry is scheduled
    LifeLost,
    /// Third mistake with the last life
    GameOver,
    /// Every target is selected
    LevelComplete,
}

impl SelectOutcome {
    /// Whether the attempt is over and the board stops accepting selections
    pub const fn ends_attempt(self) -> bool {
        use SelectOutcome::*;
        match self {
            Selected => false,
            Deselected => false,
            Mistake => false,
            LifeLost => true,
            GameOver => true,
            LevelComplete => true,
        }
    }
}

/// Outcome of advancing the engine clock
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Changed,
}

impl TickOutcome {
    /// Whether any scheduled task ran and the state may differ
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
