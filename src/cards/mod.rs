//! Cards and the deck they are dealt into.
//!
//! - `Card`: symbol, face state and a stable id
//! - `Deck`: fixed-length slots with holes for matched pairs
//! - `Selection`: the 0/1/2 face-up state derived from a deck

mod card;
mod deck;

pub use card::{Card, CardId};
pub use deck::{Deck, Selection};
