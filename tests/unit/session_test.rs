//! Session behaviour over explicit time: history, clipboard timer, errors.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use passkit::Error;
use passkit::pass::{CharacterClass, ClassSet, GenerationOptions};
use passkit::rand::{EntropySource, Sampler};
use passkit::session::{ClipboardTimer, Level, MemoryClipboard, Notification, Session};
use passkit::settings::Settings;

type TestSession = Session<MemoryClipboard, Vec<Notification>>;

fn setup(now: Instant) -> TestSession {
    Session::new(
        Settings::default(),
        Sampler::os(),
        MemoryClipboard::default(),
        Vec::new(),
        now,
    )
}

/// Replays fixed draws, then repeats zero.
struct Script(VecDeque<u32>);

impl EntropySource for Script {
    fn next_u32(&mut self) -> passkit::Result<u32> {
        Ok(self.0.pop_front().unwrap_or(0))
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

/// One lowercase character per password: a draw of `n` yields the `n`th letter.
/// Each generation takes one draw for the password and one for the reveal.
fn scripted(draws: &[u32], now: Instant) -> Session<MemoryClipboard, Vec<Notification>, Script> {
    let mut settings = Settings::default();
    settings.options = GenerationOptions::default()
        .with_classes(ClassSet::only(&[CharacterClass::Lowercase]))
        .with_length(1);
    Session::new(
        settings,
        Sampler::new(Script(draws.iter().copied().collect())),
        MemoryClipboard::default(),
        Vec::new(),
        now,
    )
}

fn listed<S: EntropySource>(session: &Session<MemoryClipboard, Vec<Notification>, S>) -> Vec<String> {
    session
        .history()
        .iter()
        .map(|e| e.password.as_str().to_string())
        .collect()
}

#[test]
fn repeat_of_last_value_is_not_recorded() {
    let t0 = Instant::now();
    let mut session = scripted(&[], t0);

    session.generate(t0).unwrap();
    session.generate(t0 + Duration::from_secs(1)).unwrap();

    assert_eq!(session.current().unwrap().as_str(), "a");
    assert_eq!(listed(&session), ["a"]);
    assert_eq!(session.generation_count(), 1);
}

#[test]
fn earlier_duplicate_is_recorded_again() {
    let t0 = Instant::now();
    // a, b, a
    let mut session = scripted(&[0, 0, 1, 0, 0, 0], t0);

    for i in 0..3 {
        session.generate(t0 + Duration::from_secs(i)).unwrap();
    }

    assert_eq!(listed(&session), ["a", "b", "a"]);
    assert_eq!(session.generation_count(), 3);
}

#[test]
fn eleven_generations_keep_ten_newest_first() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    let mut made = Vec::new();

    for i in 0..11 {
        session.generate(t0 + Duration::from_secs(i)).unwrap();
        made.push(session.current().unwrap().as_str().to_string());
    }

    assert_eq!(session.generation_count(), 11);
    let listed: Vec<&str> = session
        .history()
        .iter()
        .map(|e| e.password.as_str())
        .collect();
    let expected: Vec<&str> = made.iter().rev().take(10).map(String::as_str).collect();
    assert_eq!(listed, expected);
}

#[test]
fn expired_entry_gone_after_next_sweep() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.generate(t0).unwrap();

    session.tick(t0 + Duration::from_secs(599)).unwrap();
    assert_eq!(session.history().len(), 1);

    session.tick(t0 + Duration::from_secs(601)).unwrap();
    assert!(session.history().is_empty());
}

#[test]
fn second_copy_cancels_first_timer() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.generate(t0).unwrap();

    session.copy_generated(t0).unwrap();
    session.copy_generated(t0 + Duration::from_secs(60)).unwrap();
    assert_eq!(
        session.clipboard_expires_at(),
        Some(t0 + Duration::from_secs(360))
    );

    let mut now = t0;
    while now < t0 + Duration::from_secs(400) {
        now += Duration::from_secs(1);
        session.tick(now).unwrap();
    }
    assert_eq!(session.clipboard_fire_count(), 1);
    assert!(matches!(session.clipboard_timer(), ClipboardTimer::Fired { .. }));
    assert_eq!(session.clipboard().contents(), Some(""));
}

#[test]
fn nothing_selected_changes_nothing() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.set_options(GenerationOptions::default().with_classes(ClassSet::NONE));

    assert_eq!(session.generate(t0), Err(Error::NoClassSelected));
    assert!(session.current().is_none());
    assert!(session.history().is_empty());
    assert_eq!(session.generation_count(), 0);
    assert_eq!(session.clipboard_timer(), ClipboardTimer::Unarmed);

    let note = session.notifier().last().unwrap();
    assert_eq!(note.level, Level::Error);
    assert_eq!(note.message, "Please select at least one character type.");
}

#[test]
fn toggled_options_drive_generation() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.toggle_class(CharacterClass::Uppercase);
    session.toggle_class(CharacterClass::Symbol);
    session.set_length(8);

    for i in 0..20 {
        session.generate(t0 + Duration::from_millis(i)).unwrap();
        let value = session.current().unwrap().as_str();
        assert_eq!(value.len(), 8);
        assert!(value.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }
}

#[test]
fn history_copy_arms_timer() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.generate(t0).unwrap();
    session.generate(t0).unwrap();
    let older = session.history().get(1).unwrap().password.as_str().to_string();

    session.copy_history(1, t0).unwrap();
    assert_eq!(session.clipboard().contents(), Some(older.as_str()));
    assert!(session.clipboard_pending());

    // Out of range is ignored.
    session.copy_history(42, t0).unwrap();
    assert_eq!(session.clipboard().write_count(), 1);
}

#[test]
fn clear_history_notifies() {
    let t0 = Instant::now();
    let mut session = setup(t0);
    session.generate(t0).unwrap();
    session.clear_history();
    assert!(session.history().is_empty());
    assert_eq!(
        session.notifier().last().map(|n| n.message.as_str()),
        Some("Generation history cleared.")
    );
}
