//! Password generation.

pub mod charset;
mod generate;
mod options;

pub use charset::{CharacterClass, ClassSet};
pub use generate::{GeneratedPassword, generate};
pub use options::{
    DEFAULT_LENGTH, GenerationOptions, MAX_LENGTH, MIN_LENGTH, clamp_length, parse_length,
};
