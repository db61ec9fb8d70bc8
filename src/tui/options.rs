//! Key handling for the interactive screen.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use passkit::error::{Error, Result};
use passkit::pass::{CharacterClass, parse_length};
use passkit::session::Session;

use super::{Input, is_ctrl, print_keys, read_line};
use crate::terminal::{RawModeGuard, clear};

pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key(session: &mut Session, guard: &mut RawModeGuard, key: KeyEvent) -> Result<Flow> {
    let now = Instant::now();
    match key.code {
        _ if is_ctrl(&key, 'c') => return Ok(Flow::Quit),
        KeyCode::Esc | KeyCode::Char('q') => return Ok(Flow::Quit),
        KeyCode::Enter | KeyCode::Char('g') => recoverable(session.generate(now))?,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            session.toggle_class(CharacterClass::ALL[index]);
        }
        KeyCode::Char('+') => {
            let length = session.options().length();
            session.set_length(length + 1);
        }
        KeyCode::Char('-') => {
            let length = session.options().length();
            session.set_length(length.saturating_sub(1));
        }
        KeyCode::Char('l') => return edit_length(session, guard),
        KeyCode::Char('c') => recoverable(session.copy_generated(now))?,
        KeyCode::Char('y') => recoverable(session.copy_evaluated(now))?,
        KeyCode::Char('e') => return evaluate(session, guard),
        KeyCode::Char('h') => return copy_history(session, guard),
        KeyCode::Char('x') => session.clear_history(),
        KeyCode::Char('w') => recoverable(session.clear_clipboard(now))?,
        KeyCode::Char('?') => return show_keys(session),
        _ => {}
    }
    Ok(Flow::Continue)
}

/// Non-fatal errors already reached the notifier.
fn recoverable(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_fatal() => Err(e),
        _ => Ok(()),
    }
}

fn edit_length(session: &mut Session, guard: &mut RawModeGuard) -> Result<Flow> {
    let initial = session.options().length().to_string();
    match prompt(session, guard, "Password length", &initial, false)? {
        Input::Submitted(input) => {
            session.set_length(parse_length(&input));
        }
        Input::Cancelled => {}
        Input::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn evaluate(session: &mut Session, guard: &mut RawModeGuard) -> Result<Flow> {
    match prompt(session, guard, "Password to evaluate", "", true)? {
        Input::Submitted(input) => {
            session.evaluate(&input);
        }
        Input::Cancelled => {}
        Input::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn copy_history(session: &mut Session, guard: &mut RawModeGuard) -> Result<Flow> {
    if session.history().is_empty() {
        return Ok(Flow::Continue);
    }
    match prompt(session, guard, "History entry to copy", "", false)? {
        Input::Submitted(input) => {
            if let Ok(index) = input.trim().parse::<usize>() {
                recoverable(session.copy_history(index, Instant::now()))?;
            }
        }
        Input::Cancelled => {}
        Input::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn show_keys(session: &mut Session) -> Result<Flow> {
    clear();
    print_keys();
    loop {
        session.tick(Instant::now())?;
        if let Some(key) = super::next_key(super::POLL) {
            clear();
            return Ok(if is_ctrl(&key, 'c') { Flow::Quit } else { Flow::Continue });
        }
    }
}

/// Read a line while the session keeps ticking.
fn prompt(
    session: &mut Session,
    guard: &mut RawModeGuard,
    label: &str,
    initial: &str,
    masked: bool,
) -> Result<Input> {
    let mut failure: Option<Error> = None;
    let input = guard.with_cursor(|| {
        read_line(label, initial, masked, &mut || {
            if failure.is_none() {
                failure = session.tick(Instant::now()).err();
            }
        })
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(input),
    }
}
