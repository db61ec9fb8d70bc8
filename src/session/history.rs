//! Generated-password history: newest first, capped, time-boxed.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::pass::GeneratedPassword;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub password: GeneratedPassword,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl HistoryEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    ttl: Duration,
}

impl History {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    /// Insert at the front. The oldest entry past capacity is evicted whatever its remaining lifetime.
    pub fn push(&mut self, password: GeneratedPassword) {
        let created_at = password.created_at();
        self.entries.push_front(HistoryEntry {
            password,
            created_at,
            expires_at: created_at + self.ttl,
        });
        self.entries.truncate(self.capacity);
    }

    /// Drop entries whose lifetime has passed. Returns how many were removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_expired(now));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
