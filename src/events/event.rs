//! Game event types.
//!
//! Every state change a host has to render is reported as one `GameEvent`.
//! Indices refer to deck positions at the moment the event fires.

use serde::{Deserialize, Serialize};

use crate::cards::Deck;

/// Something the host should render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The countdown changed (also fired once when it starts).
    TimeChanged { remaining_secs: u32 },

    /// The running score changed.
    ScoreChanged { score: i64 },

    /// The engine turned the card at `index` face up.
    CardSelected { index: usize },

    /// Cards moved; the host should redraw the whole board.
    PositionsChanged { deck: Deck },

    /// A pair matched and both slots are now empty.
    MatchSucceeded { first: usize, second: usize },

    /// A mismatched pair has been turned face down again.
    MatchFailed { first: usize, second: usize },

    /// The game is over. No further events follow.
    GameFinished { score: i64, won: bool },
}

impl GameEvent {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            GameEvent::TimeChanged { .. } => "time_changed",
            GameEvent::ScoreChanged { .. } => "score_changed",
            GameEvent::CardSelected { .. } => "card_selected",
            GameEvent::PositionsChanged { .. } => "positions_changed",
            GameEvent::MatchSucceeded { .. } => "match_succeeded",
            GameEvent::MatchFailed { .. } => "match_failed",
            GameEvent::GameFinished { .. } => "game_finished",
        }
    }

    /// Is this the final event of a game?
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameFinished { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_terminal() {
        let finished = GameEvent::GameFinished { score: 10, won: true };
        assert_eq!(finished.kind(), "game_finished");
        assert!(finished.is_terminal());

        let tick = GameEvent::TimeChanged { remaining_secs: 3 };
        assert_eq!(tick.kind(), "time_changed");
        assert!(!tick.is_terminal());
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::MatchFailed { first: 1, second: 4 };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
    }
}
