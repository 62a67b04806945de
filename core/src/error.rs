use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cube size {size}, no surface to play on")]
    InvalidSize { size: Coord },
    #[error("Too many mines, requested {requested} but only {max} fit")]
    InvalidMineCount {
        requested: CellCount,
        max: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No cell at the given position")]
    CellNotFound,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("A layer rotation is in progress")]
    RotationInProgress,
    #[error("No layer rotation has been started")]
    NoRotationPending,
    #[error("Malformed game configuration")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
