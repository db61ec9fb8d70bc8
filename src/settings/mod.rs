//! Session settings. Held in memory only; nothing is written to disk.

use std::time::Duration;

use crate::pass::GenerationOptions;

#[derive(Debug, Clone)]
pub struct Settings {
    pub options: GenerationOptions,
    pub history_capacity: usize,
    pub history_ttl: Duration,
    pub clipboard_clear_delay: Duration,
    /// Gap between the decoy overwrite and the final blank write.
    pub clipboard_blank_pause: Duration,
    pub sweep_interval: Duration,
    pub reveal_frames: u8,
    pub reveal_frame_interval: Duration,
    /// Length of the random decoy written over the clipboard before blanking.
    pub decoy_length: usize,
}

impl Settings {
    pub fn with_options(options: GenerationOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            options: GenerationOptions::default(),
            history_capacity: 10,
            history_ttl: Duration::from_secs(10 * 60),
            clipboard_clear_delay: Duration::from_secs(5 * 60),
            clipboard_blank_pause: Duration::from_millis(50),
            sweep_interval: Duration::from_secs(1),
            reveal_frames: 10,
            reveal_frame_interval: Duration::from_millis(20),
            decoy_length: 32,
        }
    }
}
