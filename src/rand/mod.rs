//! Unbiased sampling over an arbitrary modulus from a secure entropy source.

mod os;

use std::num::NonZeroU32;

pub use os::OsEntropy;

use crate::error::{Error, Result};

/// A source of uniformly distributed 32-bit values suitable for cryptographic use.
pub trait EntropySource {
    fn next_u32(&mut self) -> Result<u32>;

    /// Human readable name for status output.
    fn name(&self) -> &'static str;
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn next_u32(&mut self) -> Result<u32> {
        (**self).next_u32()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// =============================================================================
// Sampler
// =============================================================================

/// Largest multiple of `max` not exceeding `u32::MAX`. Draws at or above it are rejected.
#[inline]
pub fn rejection_limit(max: NonZeroU32) -> u32 {
    (u32::MAX / max.get()) * max.get()
}

pub struct Sampler<S = OsEntropy> {
    source: S,
}

impl Sampler<OsEntropy> {
    pub fn os() -> Self {
        Sampler::new(OsEntropy)
    }
}

impl<S: EntropySource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    #[cfg(test)]
    pub(crate) fn source_ref(&self) -> &S {
        &self.source
    }

    /// Uniform value in `[0, max)`.
    pub fn uniform(&mut self, max: NonZeroU32) -> Result<u32> {
        let limit = rejection_limit(max);
        loop {
            let value = self.source.next_u32()?;
            if value < limit {
                return Ok(value % max.get());
            }
        }
    }

    /// Uniform index into a collection of `len` items. An empty collection means
    /// no class was selected.
    pub fn index(&mut self, len: usize) -> Result<usize> {
        let len32 = u32::try_from(len).map_err(|_| Error::AlphabetTooLarge(len))?;
        let max = NonZeroU32::new(len32).ok_or(Error::NoClassSelected)?;
        Ok(self.uniform(max)? as usize)
    }

    /// Pick one byte from an alphabet.
    pub fn pick(&mut self, alphabet: &[u8]) -> Result<u8> {
        let idx = self.index(alphabet.len())?;
        Ok(alphabet[idx])
    }

    /// Fisher-Yates shuffle, one `uniform(i + 1)` draw per swap.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<()> {
        for i in (1..items.len()).rev() {
            let bound = NonZeroU32::MIN.saturating_add(i as u32);
            let j = self.uniform(bound)? as usize;
            items.swap(i, j);
        }
        Ok(())
    }
}
