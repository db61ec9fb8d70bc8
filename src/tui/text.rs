use std::time::Instant;

use passkit::pass::{CharacterClass, MAX_LENGTH, MIN_LENGTH};
use passkit::session::{ClipboardTimer, Level, Notification, Session};

use crate::terminal::{
    DIM, RESET, UNDERLINE, box_bottom, box_line, box_line_center, box_opt, box_rule, box_top,
    flush, format_remaining, home, line, print_error, print_report, print_success, tier_meter,
};

/// Longest password shown in full on the history list.
const HISTORY_COLUMNS: usize = 48;

pub fn print_help() {
    box_top("passkit");
    box_line_center("Password generator and strength checker");
    box_line("");
    box_line("MODES:");
    box_line("  1) Interactive: Run without arguments. Generate, evaluate and copy");
    box_line("     passwords from a live screen with history and clipboard timers.");
    box_line("  2) Client: Pass flags directly (e.g., -l 20 -n 5) to generate or");
    box_line("     evaluate without the screen.");
    box_line("");
    box_line("USAGE:");
    box_line("  passkit [OPTIONS]");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Password:");
    box_opt("  -l, --length <N>", "Characters per password, 1 to 64 (default: 16)");
    box_opt("  -n, --number <N>", "How many to generate (default: 1)");
    box_opt("      --no-lower", "Leave out lowercase letters");
    box_opt("      --no-upper", "Leave out uppercase letters");
    box_opt("      --no-digits", "Leave out digits");
    box_opt("      --no-symbols", "Leave out symbols");
    box_line("");
    box_line(" Strength:");
    box_opt("  -e, --evaluate <PW>", "Score a password instead of generating one");
    box_opt("      --stdin", "Read the password to score from stdin");
    box_line("");
    box_line(" Output:");
    box_opt("  -b, --board", "Copy to clipboard and wait until it is cleared (5 minutes)");
    box_opt("  -q, --quiet", "Only passwords, or tier and bits when evaluating");
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  passkit                    Interactive screen");
    box_line("  passkit -l 20 -n 3         Three passwords, 20 characters each");
    box_line("  passkit --no-symbols       Alphanumeric only");
    box_line("  passkit -e 'hunter2'       Strength report for a password");
    box_line("  passkit -b                 Copy one password, clear in 5 minutes");
    box_line("");
    box_line("Set RUST_LOG=debug to trace timers on stderr. Passwords are never logged.");
    box_bottom();
    line("");
    flush();
}

pub fn print_keys() {
    box_top("Keys");
    box_opt("  Enter / g", "Generate with the current options");
    box_opt("  1 2 3 4", "Toggle lowercase, uppercase, digits, symbols");
    box_opt("  l  + -", "Set the length, or nudge it by one");
    box_opt("  c", "Copy the generated password");
    box_opt("  e", "Evaluate a password you type");
    box_opt("  y", "Copy the evaluated password");
    box_opt("  h", "Copy a history entry by number");
    box_opt("  x", "Clear history");
    box_opt("  w", "Wipe the clipboard now");
    box_opt("  ?", "This screen");
    box_opt("  q / Esc", "Quit (a pending clipboard is wiped)");
    box_bottom();
    line("");
    line(&format!("{DIM}Press any key to go back.{RESET}"));
    flush();
}

pub fn print_screen(session: &Session, now: Instant, status: Option<&Notification>) {
    home();
    box_top("passkit");
    box_line_center("?: keys | q: quit");
    box_line("");

    box_line(&format!("{UNDERLINE}Generated{RESET}:"));
    match session.displayed() {
        Some(shown) => box_line(&format!("  {shown}")),
        None => box_line(&format!("  {DIM}press Enter to generate{RESET}")),
    }
    match session.current_report() {
        Some(report) if !session.is_revealing() => box_line(&format!(
            "  {}  {} bits",
            tier_meter(report.tier),
            report.rounded_bits()
        )),
        _ => box_line(""),
    }
    box_line("");

    let options = session.options();
    box_line(&format!("{UNDERLINE}Options{RESET}:"));
    for (i, class) in CharacterClass::ALL.iter().enumerate() {
        let mark = if options.classes().contains(*class) { "x" } else { " " };
        box_line(&format!(
            "  {}) [{mark}] {} ({})",
            i + 1,
            class.label(),
            class.size()
        ));
    }
    box_line(&format!(
        "  l) Length: {} ({MIN_LENGTH}-{MAX_LENGTH})",
        options.length()
    ));
    box_line("");

    print_history(session, now);
    box_line("");
    box_line(&format!("{UNDERLINE}Clipboard{RESET}: {}", clipboard_status(session, now)));
    box_rule();
    box_line("  Enter) generate | c) copy | e) evaluate | y) copy evaluated");
    box_line("  h) copy history | x) clear history | w) wipe clipboard");
    box_bottom();

    if let Some(report) = session.evaluated() {
        print_report("Evaluated", report);
    }

    match status {
        Some(n) if n.level == Level::Error => print_error(&n.message),
        Some(n) => print_success(&n.message),
        None => line(""),
    }
    flush();
}

fn print_history(session: &Session, now: Instant) {
    let history = session.history();
    box_line(&format!(
        "{UNDERLINE}History{RESET}: {}/{} {DIM}(generated this session: {}){RESET}",
        history.len(),
        history.capacity(),
        session.generation_count()
    ));
    if history.is_empty() {
        box_line(&format!("  {DIM}empty{RESET}"));
    }
    for (i, entry) in history.iter().enumerate() {
        let value = entry.password.as_str();
        let shown = if value.len() > HISTORY_COLUMNS {
            format!("{}…", &value[..HISTORY_COLUMNS - 1])
        } else {
            value.to_string()
        };
        box_line(&format!(
            "  {i}) {shown:<width$} {DIM}{}{RESET}",
            format_remaining(entry.remaining(now)),
            width = HISTORY_COLUMNS
        ));
    }
}

fn clipboard_status(session: &Session, now: Instant) -> String {
    match session.clipboard_timer() {
        ClipboardTimer::Armed { expires_at, .. } => format!(
            "clears in {}",
            format_remaining(expires_at.saturating_duration_since(now))
        ),
        ClipboardTimer::Fired { .. } => "cleared".to_string(),
        ClipboardTimer::Cancelled { .. } => "wiped".to_string(),
        ClipboardTimer::Unarmed => format!("{DIM}idle{RESET}"),
    }
}
