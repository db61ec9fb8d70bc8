//! Raw mode RAII guard.

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::{hide_cursor, show_cursor};

/// Raw mode for the lifetime of the guard. With `hidden` the cursor is hidden too
/// and comes back on drop.
pub struct RawModeGuard {
    enabled: bool,
    hidden: bool,
}

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            enabled: true,
            hidden: false,
        })
    }

    pub fn hidden() -> io::Result<Self> {
        let mut guard = Self::new()?;
        hide_cursor();
        guard.hidden = true;
        Ok(guard)
    }

    /// Show the cursor for a prompt, hide it again when `f` returns.
    pub fn with_cursor<T>(&mut self, f: impl FnOnce() -> T) -> T {
        if self.hidden {
            show_cursor();
        }
        let out = f();
        if self.hidden {
            hide_cursor();
        }
        out
    }

    pub fn disable(&mut self) {
        if self.hidden {
            show_cursor();
            self.hidden = false;
        }
        if self.enabled {
            let _ = disable_raw_mode();
            self.enabled = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.disable();
    }
}
