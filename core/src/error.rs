use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index {0} is outside the grid")]
    InvalidIndex(u8),
    #[error("Level catalog must contain at least one level")]
    EmptyCatalog,
    #[error("Invalid session config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
