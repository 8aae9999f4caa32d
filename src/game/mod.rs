//! The Concentration game engine.
//!
//! Flip two cards; matching symbols leave the board for points, mismatches
//! cost a point and turn back over. Clear the board before the countdown
//! runs out. On Hard the board rotates every ten seconds.

mod builder;
mod engine;

pub use builder::GameBuilder;
pub use engine::{ConcentrationGame, GameOutcome, Phase};
