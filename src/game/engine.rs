//! The Concentration rule engine.
//!
//! ## Lifecycle
//!
//! `Setup -> Running -> (Settling ->) Finished`
//!
//! - `Setup`: deck can be built and shuffled, cards can already be selected
//! - `Running`: the countdown ticks
//! - `Settling`: board cleared, win announced after `finish_delay_ms`
//! - `Finished`: terminal, every call is a no-op
//!
//! ## Time
//!
//! Time only moves when the host calls [`ConcentrationGame::advance`] or
//! [`ConcentrationGame::tick`]. The countdown, the mismatch flip-back and the
//! win announcement are timers on an internal [`Scheduler`]. Finishing the
//! game cancels all of them.

use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, Deck, Selection};
use crate::core::{Difficulty, GameConfig, GameRng, Scheduler, TimerId};
use crate::events::{GameEvent, GameObserver, Notifier};

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Accumulated score, plus remaining seconds on a win.
    pub score: i64,
    pub won: bool,
}

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Countdown not started yet.
    #[default]
    Setup,
    /// Countdown running.
    Running,
    /// Every pair matched; waiting to announce the win.
    Settling,
    /// Game over.
    Finished(GameOutcome),
}

impl Phase {
    /// True once no further selections are accepted.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Settling | Phase::Finished(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Tick,
    FlipBack,
    AnnounceWin,
}

/// A mismatched pair waiting to be turned back over.
#[derive(Clone, Copy, Debug)]
struct PendingFlip {
    timer: TimerId,
    first: CardId,
    second: CardId,
    /// Already turned down by a clearing tap; only the event is left to send.
    cleared: bool,
}

/// One game session.
#[derive(Debug)]
pub struct ConcentrationGame {
    config: GameConfig,
    difficulty: Difficulty,
    symbols: Vec<String>,
    deck: Deck,
    score: i64,
    remaining_secs: u32,
    phase: Phase,
    /// Stream for dealing, kept apart from reshuffles.
    deal_rng: GameRng,
    shuffle_rng: GameRng,
    scheduler: Scheduler<Task>,
    countdown: Option<TimerId>,
    flip_backs: SmallVec<[PendingFlip; 2]>,
    notifier: Notifier,
}

impl ConcentrationGame {
    /// Create a game with default configuration and a random seed.
    ///
    /// See [`GameBuilder`](super::GameBuilder) for seeds and custom timing.
    pub fn new<I, S>(symbols: I, difficulty: Difficulty) -> crate::core::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        super::GameBuilder::new()
            .symbols(symbols)
            .difficulty(difficulty)
            .build()
    }

    /// Assemble a game from input the builder already validated.
    pub(super) fn from_validated(
        symbols: Vec<String>,
        difficulty: Difficulty,
        config: GameConfig,
        rng: GameRng,
    ) -> Self {
        Self {
            remaining_secs: config.duration_secs,
            deal_rng: rng.for_context("deal"),
            shuffle_rng: rng.for_context("shuffle"),
            config,
            difficulty,
            symbols,
            deck: Deck::default(),
            score: 0,
            phase: Phase::Setup,
            scheduler: Scheduler::new(),
            countdown: None,
            flip_backs: SmallVec::new(),
            notifier: Notifier::new(),
        }
    }

    // === Observer ===

    /// Attach the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.notifier.set(observer);
    }

    /// Detach the observer. Later events are dropped.
    pub fn clear_observer(&mut self) {
        self.notifier.clear();
    }

    #[must_use]
    pub fn has_observer(&self) -> bool {
        self.notifier.is_attached()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Symbols the game was created with, before the cap is applied.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.deck.selection()
    }

    /// Virtual time elapsed since the game was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.scheduler.now_ms())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    // === Deck ===

    /// Deal a fresh face-down deck and return it.
    ///
    /// Only deals during setup; afterwards returns the current deck.
    pub fn create_deck(&mut self) -> Deck {
        if self.phase != Phase::Setup {
            debug!("create_deck ignored in phase {:?}", self.phase);
            return self.deck.clone();
        }

        self.deck = Deck::build(
            self.symbols.as_slice(),
            self.config.max_symbols,
            &mut self.deal_rng,
        );
        debug!(
            "dealt {} cards from {} symbols ({})",
            self.deck.len(),
            self.symbols.len().min(self.config.max_symbols),
            self.difficulty
        );
        self.deck.clone()
    }

    /// Re-permute the current deck, holes included, and return it.
    ///
    /// Meant for the one-time hide after the opening peek.
    pub fn shuffle(&mut self) -> Deck {
        if !self.phase.is_over() {
            self.deck.reshuffle(&mut self.shuffle_rng);
        }
        self.deck.clone()
    }

    // === Countdown ===

    /// Start the countdown. Repeated calls are ignored.
    pub fn start_timer(&mut self) {
        if self.phase != Phase::Setup {
            trace!("start_timer ignored in phase {:?}", self.phase);
            return;
        }

        self.phase = Phase::Running;
        debug!("countdown started at {}s", self.remaining_secs);
        self.notifier.emit(GameEvent::TimeChanged {
            remaining_secs: self.remaining_secs,
        });
        self.countdown = Some(
            self.scheduler
                .schedule_repeating(self.config.tick_ms, Task::Tick),
        );
    }

    /// Move virtual time forward, firing every timer that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);

        while let Some((timer, task)) = self.scheduler.next_due(until) {
            self.run(timer, task);
        }
        self.scheduler.advance_clock(until);
    }

    /// Advance by one countdown period.
    pub fn tick(&mut self) {
        self.advance(Duration::from_millis(self.config.tick_ms));
    }

    fn run(&mut self, timer: TimerId, task: Task) {
        match task {
            Task::Tick => self.on_tick(),
            Task::FlipBack => {
                if let Some(pos) = self.flip_backs.iter().position(|p| p.timer == timer) {
                    let pending = self.flip_backs.remove(pos);
                    self.flip_back_pair(pending);
                }
            }
            Task::AnnounceWin => {
                let outcome = GameOutcome {
                    score: self.score.saturating_add(i64::from(self.remaining_secs)),
                    won: true,
                };
                self.finish(outcome);
            }
        }
    }

    fn on_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.notifier.emit(GameEvent::TimeChanged {
            remaining_secs: self.remaining_secs,
        });

        if self.remaining_secs == 0 {
            let outcome = GameOutcome {
                score: self.score,
                won: false,
            };
            self.finish(outcome);
            return;
        }

        if self.difficulty.rotates_board()
            && self.remaining_secs % self.config.rotation_interval_secs == 0
        {
            self.deck.rotate_right();
            debug!("board rotated at {}s", self.remaining_secs);
            self.notifier.emit(GameEvent::PositionsChanged {
                deck: self.deck.clone(),
            });
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(timer) = self.countdown.take() {
            self.scheduler.cancel(timer);
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.stop_countdown();
        let voided = self.scheduler.cancel_all();
        self.flip_backs.clear();
        self.phase = Phase::Finished(outcome);

        debug!(
            "game finished: score {} won {} ({} pending timers voided)",
            outcome.score, outcome.won, voided
        );
        self.notifier.emit(GameEvent::GameFinished {
            score: outcome.score,
            won: outcome.won,
        });
    }

    // === Selection ===

    /// Handle a tap on the card at `index`.
    ///
    /// - nothing face up: turn it over
    /// - one face up: turn it over and resolve the pair
    /// - two face up: turn everything face down instead
    ///
    /// Holes, out-of-range indices, re-selecting the face-up card and any
    /// tap after the board is cleared are ignored.
    pub fn select_card(&mut self, index: usize) {
        if self.phase.is_over() {
            trace!("selection {} ignored, game over", index);
            return;
        }
        if self.deck.get(index).is_none() {
            trace!("selection {} ignored, no card there", index);
            return;
        }

        match self.deck.selection() {
            Selection::Empty => {
                self.deck.flip_up(index);
                self.notifier.emit(GameEvent::CardSelected { index });
            }
            Selection::One(first) if first == index => {}
            Selection::One(first) => {
                self.deck.flip_up(index);
                self.notifier.emit(GameEvent::CardSelected { index });
                self.resolve_pair(first, index);
            }
            Selection::Two(..) => self.clear_selection(),
        }
    }

    fn resolve_pair(&mut self, first: usize, second: usize) {
        let (Some(a), Some(b)) = (self.deck.get(first), self.deck.get(second)) else {
            return;
        };
        let matched = a == b;
        let (a, b) = (a.id(), b.id());

        if matched {
            self.set_score(self.score.saturating_add(self.config.match_reward));
            self.deck.remove(first);
            self.deck.remove(second);
            debug!("matched {} and {}, {} cards left", first, second, self.deck.remaining());
            self.notifier
                .emit(GameEvent::MatchSucceeded { first, second });

            if self.deck.is_cleared() {
                self.begin_settling();
            }
        } else {
            self.set_score(self.score.saturating_sub(self.config.mismatch_penalty));
            debug!("mismatch at {} and {}", first, second);

            let timer = self
                .scheduler
                .schedule_once(self.config.flip_back_delay_ms, Task::FlipBack);
            self.flip_backs.push(PendingFlip {
                timer,
                first: a,
                second: b,
                cleared: false,
            });
        }
    }

    fn set_score(&mut self, score: i64) {
        self.score = score;
        self.notifier.emit(GameEvent::ScoreChanged { score });
    }

    /// Board cleared: stop the clock and announce after a short pause.
    fn begin_settling(&mut self) {
        self.stop_countdown();
        self.scheduler.cancel_all();
        self.flip_backs.clear();
        self.phase = Phase::Settling;
        self.scheduler
            .schedule_once(self.config.finish_delay_ms, Task::AnnounceWin);
    }

    /// Third tap while two cards are up: everything goes face down and
    /// nothing is reported. A mismatch still on display keeps its timer and
    /// is reported when it fires.
    fn clear_selection(&mut self) {
        self.deck.face_down_all();
        for pending in &mut self.flip_backs {
            pending.cleared = true;
        }
    }

    fn flip_back_pair(&mut self, pending: PendingFlip) {
        let first = self.deck.position_of(pending.first);
        let second = self.deck.position_of(pending.second);
        if !pending.cleared {
            self.deck.face_down(pending.first);
            self.deck.face_down(pending.second);
        }

        if let (Some(first), Some(second)) = (first, second) {
            self.notifier.emit(GameEvent::MatchFailed { first, second });
        }
    }
}
