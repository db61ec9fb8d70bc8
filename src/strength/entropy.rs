//! Entropy estimate with penalties for weak patterns.

use std::collections::{BTreeSet, HashMap};

use crate::pass::CharacterClass;

pub const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "12345678",
    "qwerty",
    "12345",
    "123456789",
    "111111",
    "password123",
    "admin",
    "user",
    "iloveyou",
];

const SEQUENCE_ALPHA: &str = "abcdefghijklmnopqrstuvwxyz";
const SEQUENCE_DIGITS: &str = "0123456789";
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

pub const COMMON_PENALTY: f64 = 20.0;
pub const REPEAT_PENALTY: f64 = 3.0;
pub const SEQUENCE_PENALTY: f64 = 3.0;
pub const KEYBOARD_PENALTY: f64 = 4.0;

/// Declaration order is comment priority: the first recorded kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PenaltyKind {
    CommonSubstring,
    Repetition,
    Sequence,
    KeyboardPattern,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenaltyReport {
    pub length: usize,
    pub base_entropy_bits: f64,
    pub total_penalty_bits: f64,
    pub reasons: BTreeSet<PenaltyKind>,
}

impl PenaltyReport {
    pub fn final_entropy_bits(&self) -> f64 {
        (self.base_entropy_bits - self.total_penalty_bits).max(0.0)
    }

    pub fn has(&self, kind: PenaltyKind) -> bool {
        self.reasons.contains(&kind)
    }

    fn penalize(&mut self, kind: PenaltyKind, bits: f64) {
        if bits > 0.0 {
            self.total_penalty_bits += bits;
            self.reasons.insert(kind);
        }
    }
}

/// Sum of alphabet sizes of every class present in the password.
pub fn pool_size(password: &str) -> usize {
    let mut seen = [false; 4];
    for c in password.chars() {
        if let Some(class) = CharacterClass::of(c) {
            seen[class as usize] = true;
        }
    }
    CharacterClass::ALL
        .into_iter()
        .filter(|&class| seen[class as usize])
        .map(CharacterClass::size)
        .sum()
}

pub fn score(password: &str) -> PenaltyReport {
    let length = password.chars().count();
    if length == 0 {
        return PenaltyReport::default();
    }

    let pool = pool_size(password);
    if pool == 0 {
        return PenaltyReport {
            length,
            ..Default::default()
        };
    }

    let mut report = PenaltyReport {
        length,
        base_entropy_bits: length as f64 * (pool as f64).log2(),
        ..Default::default()
    };

    let lower: Vec<char> = password.to_lowercase().chars().collect();
    let folded: String = lower.iter().collect();

    report.penalize(PenaltyKind::CommonSubstring, common_penalty(&folded));
    report.penalize(PenaltyKind::Repetition, repetition_penalty(&lower, length));
    report.penalize(PenaltyKind::Sequence, sequence_penalty(&lower));
    report.penalize(PenaltyKind::KeyboardPattern, keyboard_penalty(&lower));

    report
}

fn common_penalty(folded: &str) -> f64 {
    if COMMON_PASSWORDS.iter().any(|common| folded.contains(common)) {
        COMMON_PENALTY
    } else {
        0.0
    }
}

/// Only counts when it outweighs the raw length.
fn repetition_penalty(lower: &[char], length: usize) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in lower {
        *counts.entry(c).or_default() += 1;
    }
    let penalty: f64 = counts
        .values()
        .filter(|&&n| n > 1)
        .map(|&n| (n - 1) as f64 * REPEAT_PENALTY)
        .sum();
    if penalty > length as f64 {
        penalty
    } else {
        0.0
    }
}

fn windows(lower: &[char]) -> impl Iterator<Item = String> + '_ {
    lower.windows(3).map(|w| w.iter().collect())
}

fn is_run(line: &str, window: &str) -> bool {
    if line.contains(window) {
        return true;
    }
    let reversed: String = line.chars().rev().collect();
    reversed.contains(window)
}

fn sequence_penalty(lower: &[char]) -> f64 {
    windows(lower)
        .filter(|w| is_run(SEQUENCE_ALPHA, w) || is_run(SEQUENCE_DIGITS, w))
        .count() as f64
        * SEQUENCE_PENALTY
}

fn keyboard_penalty(lower: &[char]) -> f64 {
    KEYBOARD_ROWS
        .iter()
        .map(|row| windows(lower).filter(|w| is_run(row, w)).count())
        .sum::<usize>() as f64
        * KEYBOARD_PENALTY
}
