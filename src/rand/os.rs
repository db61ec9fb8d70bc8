//! Operating system CSPRNG.

use ::rand::RngCore;
use ::rand::rngs::OsRng;

use super::EntropySource;
use crate::error::{Error, Result};

/// `getrandom(2)` / `BCryptGenRandom` / `SecRandomCopyBytes`, via `OsRng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    #[inline]
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        OsRng.try_fill_bytes(&mut buf).map_err(|e| {
            log::error!("OS random source failed: {e}");
            Error::RandomnessUnavailable(e.to_string())
        })?;
        Ok(u32::from_le_bytes(buf))
    }

    fn name(&self) -> &'static str {
        "OS CSPRNG"
    }
}
