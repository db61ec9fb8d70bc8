//! Terminal output utilities.
//!
//! Box drawing, strength reports, colors and ANSI helpers. Every line ends in
//! `\r\n` so the same calls work in raw mode and in cooked mode.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::terminal::disable_raw_mode;

use passkit::strength::{Rgb, StrengthReport, StrengthTier};

// ============================================================================
// ANSI Color/Style Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const DIM: &str = "\x1b[90m";
pub const RED: &str = "\x1b[38;5;9m";
pub const GREEN: &str = "\x1b[38;5;10m";

/// Truecolor foreground.
pub fn paint(color: Rgb, text: &str) -> String {
    let Rgb(r, g, b) = color;
    format!("\x1b[38;2;{r};{g};{b}m{text}{RESET}")
}

// ============================================================================
// Terminal Control
// ============================================================================

/// Clear screen and move cursor to top-left.
pub fn clear() {
    print!("\x1b[2J\x1b[3J\x1b[H");
    flush();
}

/// Move to top-left and clear below, without the scrollback wipe.
pub fn home() {
    print!("\x1b[H\x1b[J");
}

pub fn hide_cursor() {
    print!("\x1b[?25l");
    flush();
}

pub fn show_cursor() {
    print!("\x1b[?25h");
    flush();
}

/// Flush stdout.
pub fn flush() {
    let _ = io::stdout().flush();
}

/// Reset terminal to sane state (fixes staggered text issues).
pub fn reset_terminal() {
    let _ = disable_raw_mode();
    print!("\x1b[0m\x1b[?25h");
    flush();
}

/// Print one line, raw-mode safe.
pub fn line(content: &str) {
    print!("{content}\r\n");
}

/// Print error message in red.
pub fn print_error(msg: &str) {
    line(&format!("{RED}{msg}{RESET}"));
}

pub fn print_success(msg: &str) {
    line(&format!("{GREEN}{msg}{RESET}"));
}

// ============================================================================
// Box Drawing (74 char width)
// ============================================================================

pub const BOX_WIDTH: usize = 74;

/// Print box top with optional title: ┌─ Title ───────────────────────────┐
pub fn box_top(title: &str) {
    if title.is_empty() {
        line(&format!("┌{}┐", "─".repeat(BOX_WIDTH - 2)));
    } else {
        let title_part = format!("─ {} ", title);
        let remaining = BOX_WIDTH.saturating_sub(2 + console_width(&title_part));
        line(&format!("┌{}{}┐", title_part, "─".repeat(remaining)));
    }
}

/// Print box content line: │ content                                        │
pub fn box_line(content: &str) {
    let inner_width = BOX_WIDTH - 4;
    let padding = inner_width.saturating_sub(console_width(content));
    line(&format!("│ {}{} │", content, " ".repeat(padding)));
}

/// Print centered box content line: │          content          │
pub fn box_line_center(content: &str) {
    let inner_width = BOX_WIDTH - 4;
    let total_padding = inner_width.saturating_sub(console_width(content));
    let left_pad = total_padding / 2;
    let right_pad = total_padding - left_pad;
    line(&format!(
        "│ {}{}{} │",
        " ".repeat(left_pad),
        content,
        " ".repeat(right_pad)
    ));
}

/// Print a horizontal rule (box style).
pub fn box_rule() {
    line(&format!("├{}┤", "─".repeat(BOX_WIDTH - 2)));
}

/// Print box bottom: └───────────────────────────────────────────────────────┘
pub fn box_bottom() {
    line(&format!("└{}┘", "─".repeat(BOX_WIDTH - 2)));
}

/// Print a help option with flag and description, auto-wrapping if needed.
pub fn box_opt(flag: &str, desc: &str) {
    let inner_width = BOX_WIDTH - 4;
    let flag_col = 27;
    let desc_col = inner_width - flag_col;

    let flag_padded = format!("{:<width$}", flag, width = flag_col);
    let lines = wrap(desc, desc_col);

    let first = lines.first().map(String::as_str).unwrap_or("");
    line(&format!("│ {}{:<width$} │", flag_padded, first, width = desc_col));

    let indent = " ".repeat(flag_col);
    for rest in lines.iter().skip(1) {
        line(&format!("│ {}{:<width$} │", indent, rest, width = desc_col));
    }
}

/// Word-wrap to `width` columns. Words longer than a line are left whole.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Calculate display width accounting for ANSI escape codes.
pub fn console_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else {
            width += 1;
        }
    }
    width
}

// ============================================================================
// Strength Display
// ============================================================================

/// Ten-cell meter filled up to the tier, in the tier color.
pub fn tier_meter(tier: &StrengthTier) -> String {
    let filled = (tier.level as usize + 1) * 10 / 7;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
    format!("{} {}", paint(tier.color, &bar), paint(tier.color, tier.name))
}

/// Minutes and seconds, for countdowns.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Box a full strength report under the given title.
pub fn print_report(title: &str, report: &StrengthReport) {
    box_top(title);
    box_line(&format!(
        "{}  {} bits, {} chars",
        tier_meter(report.tier),
        report.rounded_bits(),
        report.length
    ));
    box_line("");
    for text in wrap(report.comment, BOX_WIDTH - 4) {
        box_line(&text);
    }
    box_line("");
    box_line(&format!("{UNDERLINE}Time to crack{RESET}:"));
    for (label, when) in report.crack_times.formatted() {
        box_line(&format!("  {:<28}{}", label, when));
    }
    box_bottom();
}
