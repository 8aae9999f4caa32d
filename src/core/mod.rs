//! Core engine types: configuration, errors, RNG, virtual-time scheduling.
//!
//! Nothing here knows about cards. The game module composes these pieces.

pub mod config;
pub mod error;
pub mod rng;
pub mod schedule;

pub use config::{Difficulty, GameConfig};
pub use error::{GameError, Result};
pub use rng::GameRng;
pub use schedule::{Scheduler, TimerId};
