//! Generation options, validated at the boundary.

use super::charset::{CharacterClass, ClassSet};
use crate::error::{Error, Result};

pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    classes: ClassSet,
    length: usize,
}

impl GenerationOptions {
    /// Rejects a length outside `MIN_LENGTH..=MAX_LENGTH`. An empty class set is
    /// accepted here; `generate` refuses it.
    pub fn new(classes: ClassSet, length: usize) -> Result<Self> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(Error::LengthOutOfRange { length });
        }
        Ok(Self { classes, length })
    }

    pub fn classes(&self) -> ClassSet {
        self.classes
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn with_classes(mut self, classes: ClassSet) -> Self {
        self.classes = classes;
        self
    }

    /// Set the length, clamped into range.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = clamp_length(length);
        self
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        self.classes.toggle(class);
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            classes: ClassSet::ALL,
            length: DEFAULT_LENGTH,
        }
    }
}

pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_LENGTH, MAX_LENGTH)
}

/// Parse free-form length input the way the length box does: digits only,
/// at most three of them, empty or invalid falls back to the default.
pub fn parse_length(input: &str) -> usize {
    let input = input.trim();
    if input.is_empty() || input.len() > 3 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_LENGTH;
    }
    input.parse().map(clamp_length).unwrap_or(DEFAULT_LENGTH)
}
