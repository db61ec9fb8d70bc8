//! The interactive session: one owner for options, the current password, history,
//! the clipboard timer and the reveal animation.
//!
//! Time never advances by itself here. The front-end passes `now` into every action
//! and calls [`Session::tick`] from its event loop, which runs whatever timers are due.

mod clipboard;
mod history;
mod notify;
mod reveal;
mod timer;

use std::time::Instant;

use zeroize::Zeroizing;

pub use clipboard::{ClipboardGuard, ClipboardSink, ClipboardTimer, MemoryClipboard, SystemClipboard};
pub use history::{History, HistoryEntry};
pub use notify::{Level, Notification, Notifier, Toasts};
pub use reveal::{Frame, Reveal};
pub use timer::{TimerToken, Timers};

use crate::error::Result;
use crate::pass::charset::{self, CharacterClass, ClassSet};
use crate::pass::{GeneratedPassword, GenerationOptions, clamp_length, generate};
use crate::rand::{EntropySource, OsEntropy, Sampler};
use crate::settings::Settings;
use crate::strength::{self, StrengthReport};

/// Work the session schedules on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SweepHistory,
    ClearClipboard,
    BlankClipboard,
    RevealFrame { run: u64 },
}

struct Evaluated {
    value: Zeroizing<String>,
    report: StrengthReport,
}

pub struct Session<C = SystemClipboard, N = Toasts, S = OsEntropy> {
    settings: Settings,
    sampler: Sampler<S>,
    options: GenerationOptions,
    current: Option<GeneratedPassword>,
    current_report: Option<StrengthReport>,
    evaluated: Option<Evaluated>,
    generation_count: u64,
    history: History,
    timers: Timers<Task>,
    sweep: Option<TimerToken>,
    reveal: Reveal,
    guard: ClipboardGuard,
    clipboard: C,
    notifier: N,
}

impl Session {
    /// Session backed by the OS random source and the desktop clipboard.
    pub fn terminal(settings: Settings, now: Instant) -> Self {
        Session::new(
            settings,
            Sampler::os(),
            SystemClipboard::new(),
            Toasts::default(),
            now,
        )
    }
}

impl<C: ClipboardSink, N: Notifier, S: EntropySource> Session<C, N, S> {
    pub fn new(settings: Settings, sampler: Sampler<S>, clipboard: C, notifier: N, now: Instant) -> Self {
        let mut timers = Timers::new();
        let sweep = Some(timers.schedule(now + settings.sweep_interval, Task::SweepHistory));
        Self {
            options: settings.options,
            history: History::new(settings.history_capacity, settings.history_ttl),
            settings,
            sampler,
            current: None,
            current_report: None,
            evaluated: None,
            generation_count: 0,
            timers,
            sweep,
            reveal: Reveal::new(),
            guard: ClipboardGuard::new(),
            clipboard,
            notifier,
        }
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GenerationOptions) {
        self.options = options;
    }

    pub fn toggle_class(&mut self, class: CharacterClass) {
        self.options.toggle(class);
    }

    /// Clamp into the allowed range and store. Returns the length actually used.
    pub fn set_length(&mut self, length: usize) -> usize {
        let length = clamp_length(length);
        self.options = self.options.with_length(length);
        length
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Generate with the current options.
    ///
    /// A configuration problem is reported through the notifier and leaves every
    /// piece of state untouched. The error is still returned so the caller can
    /// tell a fatal randomness failure apart with `Error::is_fatal`. Randomness
    /// needed for the first reveal frame is drawn before anything is recorded.
    pub fn generate(&mut self, now: Instant) -> Result<()> {
        let password = match generate(&mut self.sampler, &self.options, now) {
            Ok(password) => password,
            Err(e) => {
                if !e.is_fatal() {
                    self.notifier.notify(Notification::error(e.to_string()));
                }
                return Err(e);
            }
        };

        let placeholder = self.noise(&charset::build(&ClassSet::ALL), password.len())?;

        let repeated = self
            .current
            .as_ref()
            .is_some_and(|last| last.as_str() == password.as_str());
        if !repeated {
            self.history.push(password.clone());
            self.generation_count += 1;
        }
        log::debug!(
            "generated password of length {} (count {}, history {})",
            password.len(),
            self.generation_count,
            self.history.len()
        );

        self.current_report = Some(strength::evaluate(password.as_str()));
        self.current = Some(password);

        let run = self.reveal.start(
            &mut self.timers,
            self.settings.reveal_frames,
            self.settings.reveal_frame_interval,
        );
        if self.reveal.step(run, &mut self.timers, now) == Frame::Placeholder {
            self.reveal.show(placeholder);
        }
        Ok(())
    }

    /// Score an arbitrary password. An empty input clears the report.
    pub fn evaluate(&mut self, password: &str) -> Option<&StrengthReport> {
        if password.is_empty() {
            self.evaluated = None;
            return None;
        }
        let report = strength::evaluate(password);
        self.evaluated = Some(Evaluated {
            value: Zeroizing::new(password.to_owned()),
            report,
        });
        self.evaluated.as_ref().map(|e| &e.report)
    }

    /// Copy the current password. Nothing happens when none has been generated.
    pub fn copy_generated(&mut self, now: Instant) -> Result<()> {
        let Some(value) = self.current.as_ref().map(|p| Zeroizing::new(p.as_str().to_owned())) else {
            return Ok(());
        };
        self.copy(&value, now)
    }

    pub fn copy_evaluated(&mut self, now: Instant) -> Result<()> {
        let Some(value) = self.evaluated.as_ref().map(|e| e.value.clone()) else {
            return Ok(());
        };
        self.copy(&value, now)
    }

    /// Copy a history entry by position, newest first.
    pub fn copy_history(&mut self, index: usize, now: Instant) -> Result<()> {
        let Some(value) = self
            .history
            .get(index)
            .map(|e| Zeroizing::new(e.password.as_str().to_owned()))
        else {
            return Ok(());
        };
        self.copy(&value, now)
    }

    /// Copy arbitrary text and arm the clear timer. On failure nothing is armed.
    pub fn copy(&mut self, value: &str, now: Instant) -> Result<()> {
        if let Err(e) = self.clipboard.set_text(value) {
            log::warn!("copy failed: {e}");
            self.notifier.notify(Notification::error(e.to_string()));
            return Err(e);
        }
        let expires_at = self
            .guard
            .arm(&mut self.timers, now, self.settings.clipboard_clear_delay);
        log::debug!(
            "clipboard armed, clears in {}s",
            expires_at.saturating_duration_since(now).as_secs()
        );
        self.notifier.notify(Notification::success(notify::COPIED));
        Ok(())
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.notifier.notify(Notification::success(notify::HISTORY_CLEARED));
    }

    /// Scrub the clipboard now and cancel the armed timer. If the scrub fails the
    /// timer stays armed and gets another go when it fires.
    pub fn clear_clipboard(&mut self, now: Instant) -> Result<()> {
        self.scrub(now)?;
        self.guard.disarm(&mut self.timers, now);
        self.notifier.notify(Notification::success(notify::CLIPBOARD_CLEARED));
        Ok(())
    }

    /// Run every task that is due. Returns a fatal error if the random source fails.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        for (token, task) in self.timers.take_due(now) {
            match task {
                Task::SweepHistory => {
                    let removed = self.history.sweep(now);
                    if removed > 0 {
                        log::debug!("history sweep expired {removed} entries");
                    }
                    self.sweep = Some(
                        self.timers
                            .schedule(now + self.settings.sweep_interval, Task::SweepHistory),
                    );
                }
                Task::ClearClipboard => {
                    if self.guard.fire(token, now) {
                        log::info!("clipboard timer fired");
                        match self.scrub(now) {
                            Ok(()) => self
                                .notifier
                                .notify(Notification::success(notify::CLIPBOARD_CLEARED)),
                            Err(e) if e.is_fatal() => return Err(e),
                            Err(_) => {}
                        }
                    }
                }
                Task::BlankClipboard => {
                    if self.guard.take_blank(token) {
                        self.blank();
                    }
                }
                Task::RevealFrame { run } => self.reveal_frame(run, now)?,
            }
        }
        Ok(())
    }

    /// Cancel everything pending. A clipboard that was waiting to be cleared is blanked.
    pub fn shutdown(&mut self, now: Instant) {
        let pending = self.guard.has_pending_work();
        self.guard.cancel(&mut self.timers, now);
        self.reveal.settle(&mut self.timers);
        if let Some(sweep) = self.sweep.take() {
            self.timers.cancel(sweep);
        }
        self.timers.cancel_all();
        if pending {
            self.blank();
        }
        log::debug!("session shut down");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current(&self) -> Option<&GeneratedPassword> {
        self.current.as_ref()
    }

    /// What the display should show right now: a placeholder while revealing.
    pub fn displayed(&self) -> Option<&str> {
        self.reveal
            .placeholder()
            .or_else(|| self.current.as_ref().map(GeneratedPassword::as_str))
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_running()
    }

    pub fn current_report(&self) -> Option<&StrengthReport> {
        self.current_report.as_ref()
    }

    pub fn evaluated(&self) -> Option<&StrengthReport> {
        self.evaluated.as_ref().map(|e| &e.report)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn generation_count(&self) -> u64 {
        self.generation_count
    }

    pub fn clipboard_timer(&self) -> ClipboardTimer {
        self.guard.state()
    }

    pub fn clipboard_expires_at(&self) -> Option<Instant> {
        self.guard.expires_at()
    }

    /// A clear is armed, or the decoy is written and the blank is still to come.
    pub fn clipboard_pending(&self) -> bool {
        self.guard.has_pending_work()
    }

    /// Number of clear timers that actually fired.
    pub fn clipboard_fire_count(&self) -> u64 {
        self.guard.fired_count()
    }

    /// Earliest history expiry.
    pub fn next_history_expiry(&self) -> Option<Instant> {
        self.history.iter().map(|e| e.expires_at).min()
    }

    /// Earliest pending task, for sizing the front-end's poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Overwrite with a random decoy, then blank after a short pause.
    fn scrub(&mut self, now: Instant) -> Result<()> {
        let decoy = match self.noise(&charset::build(&ALPHANUMERIC), self.settings.decoy_length) {
            Ok(decoy) => decoy,
            Err(e) => {
                self.blank();
                return Err(e);
            }
        };
        if let Err(e) = self.clipboard.set_text(&decoy) {
            log::warn!("clipboard overwrite failed: {e}");
            self.notifier.notify(Notification::error(e.to_string()));
            return Err(e);
        }
        self.guard
            .schedule_blank(&mut self.timers, now + self.settings.clipboard_blank_pause);
        log::info!("clipboard overwritten, blank pending");
        Ok(())
    }

    fn blank(&mut self) {
        match self.clipboard.set_text("") {
            Ok(()) => log::info!("clipboard cleared"),
            Err(e) => log::warn!("clipboard blank failed: {e}"),
        }
    }

    fn reveal_frame(&mut self, run: u64, now: Instant) -> Result<()> {
        if self.reveal.step(run, &mut self.timers, now) != Frame::Placeholder {
            return Ok(());
        }
        let len = self.current.as_ref().map_or(0, GeneratedPassword::len);
        match self.noise(&charset::build(&ClassSet::ALL), len) {
            Ok(placeholder) => {
                self.reveal.show(placeholder);
                Ok(())
            }
            Err(e) => {
                self.reveal.settle(&mut self.timers);
                Err(e)
            }
        }
    }

    fn noise(&mut self, alphabet: &[u8], len: usize) -> Result<Zeroizing<String>> {
        let mut out = Zeroizing::new(String::with_capacity(len));
        for _ in 0..len {
            out.push(self.sampler.pick(alphabet)? as char);
        }
        Ok(out)
    }
}

const ALPHANUMERIC: ClassSet = ClassSet {
    lowercase: true,
    uppercase: true,
    digits: true,
    symbols: false,
};
