//! CLI context - bundles settings and flags, runs one command and exits.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use passkit::error::Error;
use passkit::pass::{DEFAULT_LENGTH, GenerationOptions, generate};
use passkit::rand::{EntropySource, Sampler};
use passkit::session::{ClipboardSink, Notifier, Session};
use passkit::settings::Settings;
use passkit::strength;

use super::{CliFlags, ParseError, prompts};
use crate::exits;
use crate::terminal::{RawModeGuard, paint, print_report};
use crate::tui::{Input, print_help, read_line};

/// Longest sleep while waiting on the clipboard timer.
const WAIT_STEP: Duration = Duration::from_millis(250);

/// Early exit with a process exit code.
pub struct Done(pub i32);

/// Application context for CLI mode.
pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
}

impl Context {
    pub fn new(args: &[String]) -> Result<Self, ParseError> {
        Ok(Self {
            settings: Settings::default(),
            flags: super::parse(args)?,
        })
    }

    /// Run CLI. Returns `Err(Done)` for early exits, `Ok(())` on completion.
    pub fn run(&mut self) -> Result<(), Done> {
        self.handle_info_flags()?;
        prompts::set_quiet(self.flags.quiet);
        if self.flags.evaluating() {
            self.evaluate()
        } else {
            self.apply_flags()?;
            self.generate_output()
        }
    }

    fn handle_info_flags(&self) -> Result<(), Done> {
        if self.flags.help {
            print_help();
            return Err(Done(0));
        }
        if self.flags.version {
            println!("passkit {}", env!("CARGO_PKG_VERSION"));
            return Err(Done(0));
        }
        Ok(())
    }

    /// Flags are strict: an out-of-range length is an error here, not clamped.
    fn apply_flags(&mut self) -> Result<(), Done> {
        let length = self.flags.length.unwrap_or(DEFAULT_LENGTH);
        let options = GenerationOptions::new(self.flags.classes(), length).map_err(usage)?;
        if options.classes().is_empty() {
            return Err(usage(Error::NoClassSelected));
        }
        self.settings = Settings::with_options(options);
        Ok(())
    }

    /// Generate passwords and handle output. Each one is written as soon as it exists.
    fn generate_output(&mut self) -> Result<(), Done> {
        let count = self.flags.number.unwrap_or(1).max(1);
        let mut sampler = Sampler::os();
        let now = Instant::now();

        if self.flags.clipboard {
            // Sized up front so no partial copy is left behind by a reallocation.
            let capacity = count * (self.settings.options.length() + 1);
            let mut joined = Zeroizing::new(String::with_capacity(capacity));
            for i in 0..count {
                let password = generate(&mut sampler, &self.settings.options, now).map_err(fatal)?;
                if i > 0 {
                    joined.push('\n');
                }
                joined.push_str(password.as_str());
            }
            log::debug!("generated {count} password(s) for the clipboard");
            return self.copy_and_wait(&joined);
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut first_tier = None;
        for i in 0..count {
            let password = generate(&mut sampler, &self.settings.options, now).map_err(fatal)?;
            if writeln!(out, "{}", password.as_str()).is_err() {
                // Reader went away, e.g. piped into `head`.
                return Ok(());
            }
            if i == 0 && count == 1 {
                first_tier = strength::quick_tier(password.as_str());
            }
        }
        let _ = out.flush();
        log::debug!("generated {count} password(s) via {}", sampler.source_name());

        if prompts::stdout_is_tty() && !prompts::quiet() {
            if let Some(tier) = first_tier {
                eprintln!("Strength: {}", paint(tier.color, tier.name));
            }
        }
        Ok(())
    }

    fn evaluate(&mut self) -> Result<(), Done> {
        let password = match self.flags.evaluate.take() {
            Some(p) => p,
            None => read_password()?,
        };
        if password.is_empty() {
            prompts::error("Nothing to evaluate.");
            return Err(Done(2));
        }

        let report = strength::evaluate(&password);
        if prompts::quiet() {
            println!("{} {}", report.tier.name, report.rounded_bits());
        } else {
            print_report("Strength", &report);
        }

        if self.flags.clipboard {
            return self.copy_and_wait(&password);
        }
        Ok(())
    }

    /// Copy, then stay alive until the clear timer has scrubbed the clipboard.
    fn copy_and_wait(&mut self, text: &str) -> Result<(), Done> {
        let start = Instant::now();
        let mut session = Session::terminal(self.settings.clone(), start);

        let copied = copy_watched(&mut session, text, start);
        drain_notes(&mut session);
        if !copied {
            return Err(Done(1));
        }
        prompts::clipboard_waiting();

        let mut interrupted = false;
        while session.clipboard_pending() {
            let now = Instant::now();
            if !interrupted && exits::shutdown_requested() {
                interrupted = true;
                if let Err(e) = session.clear_clipboard(now) {
                    drain_notes(&mut session);
                    if e.is_fatal() {
                        session.shutdown(now);
                        return Err(fatal(e));
                    }
                    break;
                }
            }
            if let Err(e) = session.tick(now) {
                session.shutdown(now);
                return Err(fatal(e));
            }
            drain_notes(&mut session);

            let wait = session
                .next_deadline()
                .map_or(WAIT_STEP, |due| due.saturating_duration_since(now))
                .min(WAIT_STEP);
            thread::sleep(wait);
        }
        session.shutdown(Instant::now());
        exits::unwatch();

        if interrupted { Err(Done(130)) } else { Ok(()) }
    }
}

/// Signals must already be watched when the password lands on the clipboard,
/// so an interrupt still reaches the scrub.
fn copy_watched<C, N, S>(session: &mut Session<C, N, S>, text: &str, now: Instant) -> bool
where
    C: ClipboardSink,
    N: Notifier,
    S: EntropySource,
{
    exits::watch();
    if session.copy(text, now).is_err() {
        exits::unwatch();
        return false;
    }
    true
}

fn drain_notes(session: &mut Session) {
    for note in session.notifier_mut().drain() {
        prompts::notification(&note);
    }
}

fn read_password() -> Result<Zeroizing<String>, Done> {
    if prompts::stdin_is_tty() {
        let mut guard = RawModeGuard::new().map_err(|e| {
            prompts::error(&format!("Unable to read from terminal: {e}"));
            Done(1)
        })?;
        let input = guard.with_cursor(|| read_line("Password", "", true, &mut || {}));
        guard.disable();
        return match input {
            Input::Submitted(password) => Ok(password),
            Input::Cancelled | Input::Quit => Err(Done(130)),
        };
    }

    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line).map_err(|e| {
        prompts::error(&format!("Unable to read stdin: {e}"));
        Done(1)
    })?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn usage(e: Error) -> Done {
    prompts::error(&e.to_string());
    prompts::usage_hint();
    Done(2)
}

fn fatal(e: Error) -> Done {
    log::error!("{e}");
    prompts::error(&e.to_string());
    Done(1)
}
