//! # concentration
//!
//! Rule engine for the Concentration memory card game.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The engine never sleeps, spawns or locks. The host
//!    forwards taps and advances virtual time; everything else follows.
//!
//! 2. **Stable Indices**: Matched cards leave holes. The board only changes
//!    length when a new deck is dealt.
//!
//! 3. **Deterministic**: Every shuffle comes from a seeded ChaCha stream, so a
//!    seed and a list of inputs replay the same game.
//!
//! ## Example
//!
//! ```
//! use concentration::{Difficulty, EventLog, GameBuilder};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let log = Rc::new(RefCell::new(EventLog::new()));
//! let mut game = GameBuilder::new()
//!     .symbols(["A", "B"])
//!     .difficulty(Difficulty::Easy)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! game.set_observer(Rc::downgrade(&log));
//!
//! game.create_deck();
//! game.shuffle();
//! game.start_timer();
//! for _ in 0..45 {
//!     game.tick();
//! }
//!
//! assert_eq!(log.borrow().finished(), Some((0, false)));
//! ```
//!
//! ## Modules
//!
//! - `core`: configuration, errors, RNG, virtual-time scheduler
//! - `cards`: cards, the deck and selection state
//! - `events`: events and the observer interface
//! - `game`: the engine and its builder

pub mod cards;
pub mod core;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{Difficulty, GameConfig, GameError, GameRng, Result, Scheduler, TimerId};

pub use crate::cards::{Card, CardId, Deck, Selection};

pub use crate::events::{EventLog, GameEvent, GameObserver, Notifier};

pub use crate::game::{ConcentrationGame, GameBuilder, GameOutcome, Phase};
