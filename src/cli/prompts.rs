//! Centralized messages for CLI output, and the global quiet switch.

use std::sync::atomic::{AtomicBool, Ordering};

use passkit::session::{Level, Notification};

// ANSI color codes
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Suppresses warnings and confirmations. Errors always print.
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

pub fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(0) == 1 }
}

pub fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(1) == 1 }
}

/// Print a warning message to stderr (yellow) - suppressed in quiet mode
pub fn warn(msg: &str) {
    if !quiet() {
        eprintln!("{YELLOW}{msg}{RESET}");
    }
}

/// Print an error message to stderr (red) - NOT suppressed (errors are always shown)
pub fn error(msg: &str) {
    eprintln!("{RED}{msg}{RESET}");
}

/// Confirmation on stderr so stdout carries only passwords.
pub fn note(msg: &str) {
    if !quiet() {
        eprintln!("{GREEN}{msg}{RESET}");
    }
}

pub fn notification(n: &Notification) {
    match n.level {
        Level::Success => note(&n.message),
        Level::Error => error(&n.message),
    }
}

pub fn clipboard_waiting() {
    warn("Keep this running until the clipboard clears. Ctrl+C clears it now.");
}

pub fn usage_hint() {
    error("Run with --help for usage.");
}
