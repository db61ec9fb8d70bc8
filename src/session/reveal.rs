//! Scramble animation shown while a freshly generated password settles.
//!
//! Every run is tagged with a number. Frames from an older run are dropped, so the
//! value left on screen is always the latest generation.

use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use super::Task;
use super::timer::{TimerToken, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The frame belonged to a superseded or finished run.
    Stale,
    /// A new placeholder is wanted; the next frame is already scheduled.
    Placeholder,
    /// The run is over and the real value should show.
    Settled,
}

#[derive(Debug, Default)]
pub struct Reveal {
    run: u64,
    frames_left: u8,
    interval: Duration,
    token: Option<TimerToken>,
    placeholder: Option<Zeroizing<String>>,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some() || self.placeholder.is_some()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref().map(String::as_str)
    }

    /// Start a new run, abandoning the previous one. The caller drives the first
    /// frame with [`Reveal::step`] using the returned run number.
    pub fn start(&mut self, timers: &mut Timers<Task>, frames: u8, interval: Duration) -> u64 {
        self.settle(timers);
        self.run += 1;
        self.frames_left = frames;
        self.interval = interval;
        self.run
    }

    pub fn step(&mut self, run: u64, timers: &mut Timers<Task>, now: Instant) -> Frame {
        if run != self.run {
            return Frame::Stale;
        }
        self.token = None;
        if self.frames_left == 0 {
            self.placeholder = None;
            return Frame::Settled;
        }
        self.frames_left -= 1;
        self.token = Some(timers.schedule(now + self.interval, Task::RevealFrame { run }));
        Frame::Placeholder
    }

    pub fn show(&mut self, placeholder: Zeroizing<String>) {
        self.placeholder = Some(placeholder);
    }

    /// Stop immediately and show the real value.
    pub fn settle(&mut self, timers: &mut Timers<Task>) {
        if let Some(token) = self.token.take() {
            timers.cancel(token);
        }
        self.frames_left = 0;
        self.placeholder = None;
    }
}
