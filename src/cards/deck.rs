//! The board: a fixed-length row of card slots.
//!
//! ## Holes
//!
//! Matched cards leave `None` behind. The deck never compacts, so hosts can
//! keep addressing cards by index. Only [`Deck::reshuffle`] and
//! [`Deck::rotate_right`] move cards, and both move holes along with them.
//!
//! Slots live in an `im::Vector` so handing a snapshot to an observer is a
//! cheap clone.

use im::Vector;
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId};
use crate::core::GameRng;

/// Which slots are currently face up.
///
/// Derived from the deck on demand; the engine never stores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing face up.
    #[default]
    Empty,
    /// One card face up, waiting for its partner.
    One(usize),
    /// Two cards face up (a mismatch being displayed).
    Two(usize, usize),
}

impl Selection {
    /// Number of face-up cards.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::One(_) => 1,
            Selection::Two(..) => 2,
        }
    }
}

/// Ordered card slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    slots: Vector<Option<Card>>,
}

impl Deck {
    /// Build a shuffled deck with two cards per symbol.
    ///
    /// Only the first `min(symbols.len(), cap)` symbols are used. Card ids
    /// are assigned in dealing order before the shuffle.
    pub fn build<S: AsRef<str>>(symbols: &[S], cap: usize, rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(symbols.len().min(cap) * 2);
        for (pair, symbol) in symbols.iter().take(cap).enumerate() {
            let Some((first, second)) = pair_ids(pair) else {
                warn!("card ids exhausted after {} pairs", pair);
                break;
            };
            cards.push(Some(Card::new(first, symbol.as_ref())));
            cards.push(Some(Card::new(second, symbol.as_ref())));
        }

        rng.shuffle(&mut cards);
        Self::from_slots(cards)
    }

    /// Create a deck from explicit slots, in order.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<Card>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// Number of slots, holes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of cards still on the board.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True once every card has been matched away.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The card at `index`, or `None` for a hole or out-of-range index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterate over slots in board order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Card>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Card ids in board order, `None` for holes.
    #[must_use]
    pub fn card_ids(&self) -> Vec<Option<CardId>> {
        self.iter().map(|slot| slot.map(Card::id)).collect()
    }

    /// Current index of a card.
    #[must_use]
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|card| card.id() == id))
    }

    /// Face-up slots as a selection state.
    #[must_use]
    pub fn selection(&self) -> Selection {
        let flipped: SmallVec<[usize; 2]> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Card::is_flipped))
            .map(|(index, _)| index)
            .collect();

        match flipped.as_slice() {
            [] => Selection::Empty,
            [first] => Selection::One(*first),
            [first, second, ..] => Selection::Two(*first, *second),
        }
    }

    /// How many cards carry each symbol.
    #[must_use]
    pub fn symbol_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for card in self.slots.iter().flatten() {
            *counts.entry(card.symbol()).or_insert(0) += 1;
        }
        counts
    }

    /// Uniformly re-permute every slot, holes included.
    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        let mut slots: Vec<Option<Card>> = self.slots.iter().cloned().collect();
        rng.shuffle(&mut slots);
        self.slots = slots.into_iter().collect();
    }

    /// Move the last slot to the front, shifting the rest one place back.
    pub fn rotate_right(&mut self) {
        if let Some(last) = self.slots.pop_back() {
            self.slots.push_front(last);
        }
    }

    /// Turn the card at `index` face up. False for holes and bad indices.
    pub(crate) fn flip_up(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(Some(card)) => {
                card.set_flipped(true);
                true
            }
            _ => false,
        }
    }

    /// Turn one card face down by id. False if it is no longer on the board.
    pub(crate) fn face_down(&mut self, id: CardId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                if let Some(Some(card)) = self.slots.get_mut(index) {
                    card.set_flipped(false);
                }
                true
            }
            None => false,
        }
    }

    /// Turn every card face down.
    pub(crate) fn face_down_all(&mut self) {
        for card in self.slots.iter_mut().flatten() {
            card.set_flipped(false);
        }
    }

    /// Remove the card at `index`, leaving a hole.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Card> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}

/// Ids of both cards of the `pair`-th symbol, if they fit in a `CardId`.
fn pair_ids(pair: usize) -> Option<(CardId, CardId)> {
    let first = u32::try_from(pair).ok()?.checked_mul(2)?;
    Some((CardId::new(first), CardId::new(first.checked_add(1)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, symbol: &str) -> Option<Card> {
        Some(Card::new(CardId::new(id), symbol))
    }

    #[test]
    fn test_build_pairs_symbols() {
        let mut rng = GameRng::new(42);
        let deck = Deck::build(&["A", "B", "C"], 4, &mut rng);

        assert_eq!(deck.len(), 6);
        assert_eq!(deck.remaining(), 6);
        let counts = deck.symbol_counts();
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n == 2));
        assert!(deck.iter().flatten().all(|c| !c.is_flipped()));
    }

    #[test]
    fn test_build_respects_cap() {
        let mut rng = GameRng::new(42);
        let deck = Deck::build(&["A", "B", "C", "D", "E", "F"], 4, &mut rng);

        assert_eq!(deck.len(), 8);
        let counts = deck.symbol_counts();
        assert!(!counts.contains_key("E"));
        assert!(!counts.contains_key("F"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = Deck::build(&["A", "B", "C", "D"], 4, &mut GameRng::new(9));
        let b = Deck::build(&["A", "B", "C", "D"], 4, &mut GameRng::new(9));
        assert_eq!(a.card_ids(), b.card_ids());
    }

    #[test]
    fn test_rotate_right_moves_holes_too() {
        let mut deck = Deck::from_slots([card(0, "A"), None, card(1, "A"), None]);
        deck.rotate_right();

        assert_eq!(
            deck.card_ids(),
            vec![None, Some(CardId::new(0)), None, Some(CardId::new(1))]
        );
    }

    #[test]
    fn test_rotate_empty_deck_is_noop() {
        let mut deck = Deck::default();
        deck.rotate_right();
        assert!(deck.is_empty());
        assert!(deck.is_cleared());
    }

    #[test]
    fn test_selection_states() {
        let mut deck = Deck::from_slots([card(0, "A"), card(1, "B"), card(2, "A"), card(3, "B")]);
        assert_eq!(deck.selection(), Selection::Empty);

        assert!(deck.flip_up(2));
        assert_eq!(deck.selection(), Selection::One(2));

        assert!(deck.flip_up(0));
        assert_eq!(deck.selection(), Selection::Two(0, 2));
        assert_eq!(deck.selection().count(), 2);

        deck.face_down_all();
        assert_eq!(deck.selection(), Selection::Empty);
    }

    #[test]
    fn test_flip_up_rejects_holes_and_bad_indices() {
        let mut deck = Deck::from_slots([None, card(0, "A")]);
        assert!(!deck.flip_up(0));
        assert!(!deck.flip_up(7));
        assert!(deck.flip_up(1));
    }

    #[test]
    fn test_remove_leaves_hole() {
        let mut deck = Deck::from_slots([card(0, "A"), card(1, "A")]);
        let removed = deck.remove(1);

        assert_eq!(removed.map(|c| c.id()), Some(CardId::new(1)));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.remaining(), 1);
        assert!(deck.get(1).is_none());
        assert!(deck.remove(1).is_none());
    }

    #[test]
    fn test_face_down_by_id_follows_rotation() {
        let mut deck = Deck::from_slots([card(0, "A"), card(1, "B")]);
        deck.flip_up(1);
        deck.rotate_right();

        assert_eq!(deck.position_of(CardId::new(1)), Some(0));
        assert!(deck.face_down(CardId::new(1)));
        assert_eq!(deck.selection(), Selection::Empty);
        assert!(!deck.face_down(CardId::new(9)));
    }

    #[test]
    fn test_pair_ids_stay_unique_at_the_limit() {
        assert_eq!(pair_ids(0), Some((CardId::new(0), CardId::new(1))));
        assert_eq!(
            pair_ids(2_147_483_647),
            Some((CardId::new(4_294_967_294), CardId::new(4_294_967_295)))
        );
        assert_eq!(pair_ids(2_147_483_648), None);
        assert_eq!(pair_ids(usize::MAX), None);
    }
}
