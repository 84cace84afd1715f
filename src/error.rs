//! Typed errors for the puzzle pipeline.
//!
//! The core returns these upward rather than aborting; `main` is the only
//! place that decides to log-and-exit, for everything except `StuckPiece`,
//! which is a diagnostic the driver logs and recovers from rather than an
//! abort.

use thiserror::Error;

use crate::geometry::{Direction, Position};

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("position {0:?} is out of bounds for this grid")]
    OutOfBounds(Position),

    #[error("no seed candidate found for piece {piece_id}")]
    NoSeedFound { piece_id: u32 },

    #[error("no path found linking the seed to any blocking voxel")]
    NoPathFound,

    #[error("piece {piece_id} has no free removal direction (defaulting to {attempted_dir:?})")]
    StuckPiece {
        piece_id: u32,
        attempted_dir: Direction,
    },

    #[error("malformed shape input: {reason}")]
    BadInput { reason: String },

    #[error("precondition violated: {reason}")]
    DomainError { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
