//! Token-keyed, cancellable scheduled tasks.
//!
//! Nothing here runs on its own thread. The owner calls [`Timers::take_due`] from
//! its event loop and dispatches whatever comes back.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Pending<T> {
    token: TimerToken,
    due: Instant,
    task: T,
}

#[derive(Debug)]
pub struct Timers<T> {
    next: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            next: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Instant, task: T) -> TimerToken {
        self.next += 1;
        let token = TimerToken(self.next);
        self.pending.push(Pending { token, due, task });
        token
    }

    /// Returns false if the token already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        self.pending.len() != before
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    pub fn due_at(&self, token: TimerToken) -> Option<Instant> {
        self.pending.iter().find(|p| p.token == token).map(|p| p.due)
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerToken, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.token));
        due.into_iter().map(|p| (p.token, p.task)).collect()
    }

    /// Earliest pending deadline, for sizing the event-loop poll timeout.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
