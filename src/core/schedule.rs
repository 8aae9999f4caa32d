//! Virtual-time timer queue.
//!
//! The engine never sleeps or spawns threads. It registers one-shot and
//! repeating timers here, and the host moves time forward. Each call to
//! [`Scheduler::next_due`] hands back the earliest timer that is due by the
//! given instant, so callers can run tasks that cancel or add other timers
//! between firings.
//!
//! ```
//! use concentration::core::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule_repeating(1000, "tick");
//! scheduler.schedule_once(1500, "flip");
//!
//! let mut fired = Vec::new();
//! while let Some((_, task)) = scheduler.next_due(2000) {
//!     fired.push(task);
//! }
//! assert_eq!(fired, vec!["tick", "flip", "tick"]);
//! ```

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug)]
struct Timer<T> {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    task: T,
}

/// Timer queue over a millisecond clock that only the caller advances.
///
/// Timers due at the same instant fire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Fire `task` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.push(delay_ms, None, task)
    }

    /// Fire `task` every `period_ms`, first firing one period from now.
    pub fn schedule_repeating(&mut self, period_ms: u64, task: T) -> TimerId {
        debug_assert!(period_ms > 0, "repeating timer needs a non-zero period");
        self.push(period_ms, Some(period_ms.max(1)), task)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer, returning how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Move the clock forward to `until_ms` without firing anything.
    ///
    /// Call after draining [`Scheduler::next_due`]. The clock never goes
    /// backwards.
    pub fn advance_clock(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            task,
        });
        id
    }
}

impl<T: Clone> Scheduler<T> {
    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are
    /// re-armed one period later and keep their id.
    pub fn next_due(&mut self, until_ms: u64) -> Option<(TimerId, T)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        self.now_ms = self.now_ms.max(self.timers[pos].due_ms);

        match self.timers[pos].period_ms {
            Some(period) => {
                let timer = &mut self.timers[pos];
                timer.due_ms = timer.due_ms.saturating_add(period);
                Some((timer.id, timer.task.clone()))
            }
            None => {
                let timer = self.timers.swap_remove(pos);
                Some((timer.id, timer.task))
            }
        }
    }
}
