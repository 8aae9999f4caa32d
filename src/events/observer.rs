//! Observer interface and the notifier that feeds it.
//!
//! ## Ownership
//!
//! The engine owns whatever it is given, so hosts pick the handle that fits:
//!
//! - `Weak<RefCell<T>>`: non-owning. Once the host drops its `Rc`,
//!   notifications are silently discarded.
//! - `Rc<RefCell<T>>`: shared ownership.
//! - `EventLog`: records events for later inspection.
//!
//! Callbacks run synchronously inside the engine call that caused them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::event::GameEvent;
use crate::cards::Deck;

/// Receives engine events. Every method defaults to doing nothing.
pub trait GameObserver {
    fn time_changed(&mut self, _remaining_secs: u32) {}

    fn score_changed(&mut self, _score: i64) {}

    fn card_selected(&mut self, _index: usize) {}

    fn positions_changed(&mut self, _deck: &Deck) {}

    fn match_succeeded(&mut self, _first: usize, _second: usize) {}

    fn match_failed(&mut self, _first: usize, _second: usize) {}

    fn game_finished(&mut self, _score: i64, _won: bool) {}

    /// Dispatch an event to the matching method.
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TimeChanged { remaining_secs } => self.time_changed(*remaining_secs),
            GameEvent::ScoreChanged { score } => self.score_changed(*score),
            GameEvent::CardSelected { index } => self.card_selected(*index),
            GameEvent::PositionsChanged { deck } => self.positions_changed(deck),
            GameEvent::MatchSucceeded { first, second } => self.match_succeeded(*first, *second),
            GameEvent::MatchFailed { first, second } => self.match_failed(*first, *second),
            GameEvent::GameFinished { score, won } => self.game_finished(*score, *won),
        }
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Rc<RefCell<T>> {
    fn notify(&mut self, event: &GameEvent) {
        self.borrow_mut().notify(event);
    }
}

impl<T: GameObserver + ?Sized> GameObserver for Weak<RefCell<T>> {
    fn notify(&mut self, event: &GameEvent) {
        if let Some(observer) = self.upgrade() {
            observer.borrow_mut().notify(event);
        }
    }
}

/// Observer that keeps every event it sees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The final event, if the game has finished.
    #[must_use]
    pub fn finished(&self) -> Option<(i64, bool)> {
        self.events.iter().find_map(|event| match event {
            GameEvent::GameFinished { score, won } => Some((*score, *won)),
            _ => None,
        })
    }
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Holds the engine's optional observer.
#[derive(Default)]
pub struct Notifier {
    observer: Option<Box<dyn GameObserver>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear(&mut self) {
        self.observer = None;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.observer.is_some()
    }

    /// Deliver an event, or drop it if nobody is listening.
    pub fn emit(&mut self, event: GameEvent) {
        log::trace!("event {}: {:?}", event.kind(), event);
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("attached", &self.is_attached())
            .finish()
    }
}
