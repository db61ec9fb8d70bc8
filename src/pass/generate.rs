//! Password generation.

use std::fmt;
use std::time::Instant;

use zeroize::{Zeroize, Zeroizing};

use super::charset;
use super::options::GenerationOptions;
use crate::error::{Error, Result};
use crate::rand::{EntropySource, Sampler};

/// A generated password and the instant it was produced. Never mutated after creation.
#[derive(Clone)]
pub struct GeneratedPassword {
    value: Zeroizing<String>,
    created_at: Instant,
}

impl GeneratedPassword {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

impl PartialEq<str> for GeneratedPassword {
    fn eq(&self, other: &str) -> bool {
        self.value.as_str() == other
    }
}

impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedPassword")
            .field("len", &self.value.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Generate a single password.
///
/// One character from each enabled class is drawn first, the rest come from the
/// union alphabet, and the whole buffer is shuffled so the guaranteed characters
/// are not clustered at the front. When the length is shorter than the number of
/// enabled classes, the guaranteed characters win and the extras are dropped.
pub fn generate<S: EntropySource>(
    sampler: &mut Sampler<S>,
    options: &GenerationOptions,
    now: Instant,
) -> Result<GeneratedPassword> {
    let classes = options.classes();
    let pool = charset::build(&classes);
    if pool.is_empty() {
        return Err(Error::NoClassSelected);
    }

    let length = options.length();
    let mut buf: Vec<u8> = Vec::with_capacity(length.max(classes.len()));

    let filled = fill(sampler, &classes, &pool, length, &mut buf);
    if let Err(e) = filled {
        buf.zeroize();
        return Err(e);
    }

    let mut value = Zeroizing::new(String::with_capacity(buf.len()));
    value.extend(buf.iter().map(|&b| b as char));
    buf.zeroize();

    log::debug!("generated {} chars from {} classes", value.len(), classes.len());

    Ok(GeneratedPassword {
        value,
        created_at: now,
    })
}

fn fill<S: EntropySource>(
    sampler: &mut Sampler<S>,
    classes: &charset::ClassSet,
    pool: &[u8],
    length: usize,
    buf: &mut Vec<u8>,
) -> Result<()> {
    for class in classes.iter() {
        buf.push(sampler.pick(class.alphabet())?);
    }

    let remaining = length.saturating_sub(buf.len());
    for _ in 0..remaining {
        buf.push(sampler.pick(pool)?);
    }

    if buf.len() > length {
        buf[length..].zeroize();
        buf.truncate(length);
    }

    sampler.shuffle(buf)
}
