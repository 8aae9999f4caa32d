//! A single playing card.
//!
//! Cards are compared by symbol only: the two cards of a pair are equal
//! whether or not either is face up, and regardless of their ids.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Stable card identifier, assigned when the deck is built.
///
/// Indices change on reshuffle and rotation; ids never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card on the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: String,
    flipped: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, symbol: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            flipped: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Is the card face up?
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.symbol.hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_equality_ignores_face_and_id() {
        let a = Card::new(CardId::new(0), "A");
        let mut b = Card::new(CardId::new(1), "A");
        b.set_flipped(true);

        assert_eq!(a, b);
        assert_ne!(a, Card::new(CardId::new(0), "B"));
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = FxHashSet::default();
        set.insert(Card::new(CardId::new(0), "A"));
        set.insert(Card::new(CardId::new(1), "A"));
        set.insert(Card::new(CardId::new(2), "B"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(3), "🎃");
        assert!(!card.is_flipped());
        assert_eq!(card.symbol(), "🎃");
        assert_eq!(card.id().to_string(), "Card(3)");
    }
}
