use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index out of range for the current grid")]
    InvalidIndex,
    #[error("Board is not accepting selections right now")]
    NotAccepting,
}

pub type Result<T> = core::result::Result<T, GameError>;
