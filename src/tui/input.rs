use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use zeroize::Zeroizing;

use crate::terminal::{DIM, RESET, flush};

/// How long to wait for a key before letting the session tick.
pub const POLL: Duration = Duration::from_millis(20);

pub enum Input {
    Submitted(Zeroizing<String>),
    Cancelled,
    /// Ctrl+C: the caller should tear the session down and exit.
    Quit,
}

/// Next key press within `timeout`, ignoring releases and repeats.
pub fn next_key(timeout: Duration) -> Option<KeyEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Line editor for raw mode. `idle` runs between key polls so timers keep firing
/// while the user types. With `masked` set, characters echo as `*`.
pub fn read_line(prompt: &str, initial: &str, masked: bool, idle: &mut dyn FnMut()) -> Input {
    let mut input: Zeroizing<Vec<char>> = Zeroizing::new(initial.chars().collect());
    let mut cursor = input.len();

    redraw(prompt, &input, cursor, masked);

    loop {
        let Some(key) = next_key(POLL) else {
            idle();
            continue;
        };

        match key.code {
            _ if is_ctrl(&key, 'c') => return Input::Quit,
            _ if is_ctrl(&key, 'q') => return Input::Cancelled,
            _ if is_ctrl(&key, 'u') => {
                input.clear();
                cursor = 0;
            }
            KeyCode::Esc => return Input::Cancelled,
            KeyCode::Enter => break,
            KeyCode::Backspace if cursor > 0 => {
                cursor -= 1;
                input.remove(cursor);
            }
            KeyCode::Delete if cursor < input.len() => {
                input.remove(cursor);
            }
            KeyCode::Left if cursor > 0 => cursor -= 1,
            KeyCode::Right if cursor < input.len() => cursor += 1,
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = input.len(),
            KeyCode::Char(c) if !c.is_control() => {
                input.insert(cursor, c);
                cursor += 1;
            }
            _ => {}
        }

        redraw(prompt, &input, cursor, masked);
    }

    print!("\r\n");
    flush();
    Input::Submitted(Zeroizing::new(input.iter().collect()))
}

fn redraw(prompt: &str, input: &[char], cursor: usize, masked: bool) {
    let shown: Zeroizing<String> = if masked {
        Zeroizing::new("*".repeat(input.len()))
    } else {
        Zeroizing::new(input.iter().collect())
    };
    print!("\r{prompt}: {}\x1b[K", shown.as_str());
    if input.is_empty() {
        print!("{DIM}(Esc cancels){RESET}");
    }
    // Move cursor to the edit position (1-based column).
    print!("\x1b[{}G", prompt.chars().count() + 3 + cursor);
    flush();
}
