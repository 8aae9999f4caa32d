//! Construction errors.
//!
//! Game play never fails: bad selections are ignored. Only building a game
//! from host-supplied input can be rejected.

use thiserror::Error;

/// Reasons a game cannot be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no card symbols supplied")]
    NoSymbols,
    #[error("card symbol at position {0} is empty")]
    EmptySymbol(usize),
    #[error("duplicate card symbol {0:?}")]
    DuplicateSymbol(String),
    #[error("symbol cap must be at least 1")]
    ZeroSymbolCap,
    #[error("game duration must be at least one second")]
    ZeroDuration,
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
    #[error("rotation interval must be non-zero")]
    ZeroRotationInterval,
    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
