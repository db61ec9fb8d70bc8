//! Clipboard sink and the one-shot clear timer.

use std::time::{Duration, Instant};

use copypasta::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroizing;

use super::Task;
use super::timer::{TimerToken, Timers};
use crate::error::{Error, Result};

/// Where copied text goes. Writes are assumed visible to the next write immediately.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, connected on first use.
#[derive(Default)]
pub struct SystemClipboard {
    ctx: Option<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&mut ClipboardContext> {
        if self.ctx.is_none() {
            let ctx = ClipboardContext::new()
                .map_err(|e| Error::ClipboardUnavailable(e.to_string()))?;
            self.ctx = Some(ctx);
        }
        self.ctx
            .as_mut()
            .ok_or_else(|| Error::ClipboardUnavailable("no clipboard context".into()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let ctx = self.context()?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| Error::ClipboardUnavailable(e.to_string()))?;
        // Read back so the provider has synced, then wipe our copy.
        if let Ok(retrieved) = ctx.get_contents() {
            drop(Zeroizing::new(retrieved));
        }
        Ok(())
    }
}

/// In-memory clipboard that records every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Vec<Zeroizing<String>>,
    pub unavailable: bool,
}

impl MemoryClipboard {
    pub fn unavailable() -> Self {
        Self {
            writes: Vec::new(),
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(|s| s.as_str())
    }

    pub fn writes(&self) -> impl Iterator<Item = &str> {
        self.writes.iter().map(|s| s.as_str())
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.unavailable {
            return Err(Error::ClipboardUnavailable("no clipboard in this session".into()));
        }
        self.writes.push(Zeroizing::new(text.to_owned()));
        Ok(())
    }
}

// =============================================================================
// Clear timer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTimer {
    Unarmed,
    Armed {
        armed_at: Instant,
        expires_at: Instant,
        token: TimerToken,
    },
    Fired {
        at: Instant,
    },
    Cancelled {
        at: Instant,
    },
}

/// Owns the single clear timer and the follow-up blank write.
#[derive(Debug)]
pub struct ClipboardGuard {
    state: ClipboardTimer,
    blank: Option<TimerToken>,
    fired: u64,
}

impl ClipboardGuard {
    pub fn new() -> Self {
        Self {
            state: ClipboardTimer::Unarmed,
            blank: None,
            fired: 0,
        }
    }

    pub fn state(&self) -> ClipboardTimer {
        self.state
    }

    pub fn expires_at(&self) -> Option<Instant> {
        match self.state {
            ClipboardTimer::Armed { expires_at, .. } => Some(expires_at),
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, ClipboardTimer::Armed { .. })
    }

    /// A clear is either armed or half done (decoy written, blank pending).
    pub fn has_pending_work(&self) -> bool {
        self.is_armed() || self.blank.is_some()
    }

    /// Number of timers that reached their deadline.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Arm a fresh timer. Any armed timer and any pending blank write are cancelled first.
    pub fn arm(&mut self, timers: &mut Timers<Task>, now: Instant, delay: Duration) -> Instant {
        self.cancel(timers, now);
        let expires_at = now + delay;
        let token = timers.schedule(expires_at, Task::ClearClipboard);
        self.state = ClipboardTimer::Armed {
            armed_at: now,
            expires_at,
            token,
        };
        expires_at
    }

    /// Cancel whatever is pending. Returns true if a timer was armed.
    pub fn cancel(&mut self, timers: &mut Timers<Task>, now: Instant) -> bool {
        if let Some(blank) = self.blank.take() {
            timers.cancel(blank);
        }
        self.disarm(timers, now)
    }

    /// Cancel the clear timer only. A pending blank write stays scheduled.
    pub fn disarm(&mut self, timers: &mut Timers<Task>, now: Instant) -> bool {
        match self.state {
            ClipboardTimer::Armed { token, .. } => {
                timers.cancel(token);
                self.state = ClipboardTimer::Cancelled { at: now };
                true
            }
            _ => false,
        }
    }

    /// Called when a clear task fires. Stale tokens are ignored.
    pub fn fire(&mut self, token: TimerToken, now: Instant) -> bool {
        match self.state {
            ClipboardTimer::Armed { token: armed, .. } if armed == token => {
                self.state = ClipboardTimer::Fired { at: now };
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    pub fn schedule_blank(&mut self, timers: &mut Timers<Task>, due: Instant) {
        if let Some(old) = self.blank.take() {
            timers.cancel(old);
        }
        self.blank = Some(timers.schedule(due, Task::BlankClipboard));
    }

    /// Called when the blank task fires. Stale tokens are ignored.
    pub fn take_blank(&mut self, token: TimerToken) -> bool {
        if self.blank == Some(token) {
            self.blank = None;
            true
        } else {
            false
        }
    }
}

impl Default for ClipboardGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_cancels_previous() {
        let t0 = Instant::now();
        let delay = Duration::from_secs(300);
        let mut timers = Timers::new();
        let mut guard = ClipboardGuard::new();

        guard.arm(&mut timers, t0, delay);
        let first = match guard.state() {
            ClipboardTimer::Armed { token, .. } => token,
            other => panic!("unexpected {other:?}"),
        };
        let expires = guard.arm(&mut timers, t0 + Duration::from_secs(10), delay);
        assert_eq!(expires, t0 + Duration::from_secs(310));
        assert!(!timers.is_pending(first));
        assert_eq!(timers.len(), 1);

        let mut fired = 0;
        for (token, task) in timers.take_due(t0 + Duration::from_secs(1000)) {
            assert_eq!(task, Task::ClearClipboard);
            if guard.fire(token, t0) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(guard.fired_count(), 1);
    }

    #[test]
    fn stale_fire_is_ignored() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let mut guard = ClipboardGuard::new();
        guard.arm(&mut timers, t0, Duration::from_secs(1));
        let stale = timers.schedule(t0, Task::ClearClipboard);
        assert!(!guard.fire(stale, t0));
        assert!(guard.is_armed());
    }

    #[test]
    fn cancel_moves_to_cancelled() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let mut guard = ClipboardGuard::new();
        assert!(!guard.cancel(&mut timers, t0));
        assert_eq!(guard.state(), ClipboardTimer::Unarmed);
        guard.arm(&mut timers, t0, Duration::from_secs(1));
        assert!(guard.cancel(&mut timers, t0));
        assert_eq!(guard.state(), ClipboardTimer::Cancelled { at: t0 });
        assert!(timers.is_empty());
    }

    #[test]
    fn arming_drops_pending_blank() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let mut guard = ClipboardGuard::new();
        guard.schedule_blank(&mut timers, t0 + Duration::from_millis(50));
        assert!(guard.has_pending_work());
        guard.arm(&mut timers, t0, Duration::from_secs(300));
        let due = timers.take_due(t0 + Duration::from_millis(100));
        assert!(due.is_empty());
    }

    #[test]
    fn memory_clipboard_records_writes() {
        let mut clip = MemoryClipboard::default();
        clip.set_text("one").unwrap();
        clip.set_text("").unwrap();
        assert_eq!(clip.writes().collect::<Vec<_>>(), vec!["one", ""]);
        assert_eq!(clip.contents(), Some(""));
        let mut gone = MemoryClipboard::unavailable();
        assert!(matches!(
            gone.set_text("x"),
            Err(Error::ClipboardUnavailable(_))
        ));
    }
}
