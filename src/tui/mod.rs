//! Interactive screen.

mod input;
mod options;
mod text;

use std::time::{Duration, Instant};

pub use input::*;
pub use options::*;
pub use text::*;

use passkit::error::Result;
use passkit::session::{Notification, Session};
use passkit::settings::Settings;

use crate::exits;
use crate::terminal::{RawModeGuard, clear, print_error, reset_terminal};

/// How long a notification stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Run TUI interactive mode. Returns the process exit code.
pub fn run() -> i32 {
    let mut session = Session::terminal(Settings::default(), Instant::now());

    let outcome = match RawModeGuard::hidden() {
        Ok(mut guard) => {
            exits::watch();
            clear();
            let outcome = event_loop(&mut session, &mut guard);
            guard.disable();
            outcome
        }
        Err(e) => {
            print_error(&format!("Unable to enter raw mode: {e}"));
            return 1;
        }
    };

    session.shutdown(Instant::now());
    exits::unwatch();
    reset_terminal();
    clear();

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e}");
            print_error(&e.to_string());
            1
        }
    }
}

fn event_loop(session: &mut Session, guard: &mut RawModeGuard) -> Result<()> {
    let mut status: Option<(Notification, Instant)> = None;
    let mut dirty = true;
    let mut shown_second = 0;
    let start = Instant::now();

    loop {
        if exits::shutdown_requested() {
            return Ok(());
        }

        let now = Instant::now();
        session.tick(now)?;

        if let Some(latest) = session.notifier_mut().drain().last() {
            status = Some((latest, now));
            dirty = true;
        }
        if status
            .as_ref()
            .is_some_and(|(_, at)| now.duration_since(*at) >= STATUS_TTL)
        {
            status = None;
            dirty = true;
        }

        // Countdowns move once a second; the reveal moves every frame.
        let second = now.duration_since(start).as_secs();
        if dirty || session.is_revealing() || second != shown_second {
            print_screen(session, now, status.as_ref().map(|(n, _)| n));
            dirty = false;
            shown_second = second;
        }

        let timeout = session
            .next_deadline()
            .map_or(POLL, |due| due.saturating_duration_since(now))
            .min(POLL);
        let Some(key) = next_key(timeout) else {
            continue;
        };
        dirty = true;
        if let Flow::Quit = handle_key(session, guard, key)? {
            return Ok(());
        }
    }
}
