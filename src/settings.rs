//! Machine-wide tunable settings.
//!
//! Settings are supplied by the admin-facing editor and persisted alongside the
//! catalog in the machine file. Bad values are rejected here, at configuration
//! time, so the draw path never has to deal with them: a nonsensical pity
//! threshold degrades to "pity disabled" instead of failing mid-draw.

use crate::constants::{DEFAULT_PITY_THRESHOLD, DEFAULT_VOLUME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Audio volume for the presentation layer, 0.0..=1.0.
    pub volume: f64,
    /// Draws without a legendary before pity forces one. Zero or negative
    /// disables pity.
    pub pity_threshold: i64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            pity_threshold: DEFAULT_PITY_THRESHOLD,
        }
    }
}

impl SystemSettings {
    /// Clamps loaded values into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        if !self.volume.is_finite() {
            self.volume = DEFAULT_VOLUME;
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    /// The pity threshold the selector actually uses. A negative configured
    /// value means the config was invalid; treat it as pity disabled.
    pub fn effective_pity_threshold(&self) -> u32 {
        if self.pity_threshold < 0 {
            0
        } else {
            self.pity_threshold as u32
        }
    }
}
