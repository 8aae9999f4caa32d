//! Event reporting.
//!
//! The engine reports state changes through a single optional
//! [`GameObserver`]. Events flow one way, engine to host.

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::{EventLog, GameObserver, Notifier};
