//! Error taxonomy shared by the generator, sampler and session.

use thiserror::Error;

use crate::pass::{MAX_LENGTH, MIN_LENGTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every character class is switched off.
    #[error("Please select at least one character type.")]
    NoClassSelected,

    #[error("Password length {length} is outside {min}..={max}", min = MIN_LENGTH, max = MAX_LENGTH)]
    LengthOutOfRange { length: usize },

    /// The operating system CSPRNG could not be read. Never downgraded.
    #[error("Secure random source unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Sampling works on `u32` moduli.
    #[error("Alphabet of {0} characters is too large to sample")]
    AlphabetTooLarge(usize),
}

impl Error {
    /// Fatal errors abort the action; everything else is reported and retried by the user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RandomnessUnavailable(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NoClassSelected | Error::LengthOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
