//! Exit handling: signal handlers, terminal cleanup, and graceful shutdown.
//!
//! While an event loop is watching, SIGINT/SIGTERM/SIGHUP only raise a flag so the
//! loop can cancel its timers and scrub a pending clipboard before leaving. With no
//! watcher the process exits straight away.

use std::sync::atomic::{AtomicBool, Ordering};

static WATCHING: AtomicBool = AtomicBool::new(false);
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Reset terminal to sane state using termios directly
fn reset_terminal_termios() {
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(0, &mut termios) == 0 {
            termios.c_oflag |= libc::OPOST | libc::ONLCR;
            termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
            libc::tcsetattr(0, libc::TCSANOW, &termios);
        }
    }
}

/// Cleanup function registered with atexit - runs on any exit
extern "C" fn cleanup_on_exit() {
    reset_terminal_termios();
    // Only print escape codes if stdout is a TTY (not when piping)
    unsafe {
        if libc::isatty(1) == 1 {
            let seq = b"\x1b[0m\x1b[?25h";
            libc::write(1, seq.as_ptr() as *const libc::c_void, seq.len());
        }
    }
}

extern "C" fn signal_handler(_: libc::c_int) {
    if WATCHING.load(Ordering::SeqCst) {
        SHUTDOWN.store(true, Ordering::SeqCst);
    } else {
        unsafe { libc::exit(130) }
    }
}

/// Crash handler for SIGSEGV/SIGABRT - restore the terminal, then re-raise for core dump
extern "C" fn crash_handler(sig: libc::c_int) {
    reset_terminal_termios();
    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

/// Install all signal handlers and register atexit cleanup.
/// Call this early in main().
pub fn install_handlers() {
    unsafe {
        libc::atexit(cleanup_on_exit);
        for sig in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
            libc::signal(sig, signal_handler as *const () as libc::sighandler_t);
        }
        for sig in [libc::SIGSEGV, libc::SIGABRT] {
            libc::signal(sig, crash_handler as *const () as libc::sighandler_t);
        }
    }
}

/// Keep core dumps and ptrace attach away from process memory.
pub fn harden() {
    #[cfg(target_os = "linux")]
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0);
    }
}

/// An event loop now owns shutdown. Termination signals set a flag instead of exiting.
pub fn watch() {
    WATCHING.store(true, Ordering::SeqCst);
}

/// Back to exiting immediately on a termination signal.
pub fn unwatch() {
    WATCHING.store(false, Ordering::SeqCst);
}

#[cfg(test)]
pub fn watching() -> bool {
    WATCHING.load(Ordering::SeqCst)
}

pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// Reset terminal state (public for use in other modules)
pub fn reset_terminal() {
    reset_terminal_termios();
}
