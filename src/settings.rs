//! Game settings
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ROWS, LEAD_IN_MS, MAX_DELAY_MS, MAX_ROWS, SETTLE_MS, STEP_DELAY_MS};
use crate::error::{LadderError, Result};
use crate::ladder::RevealPacing;

/// Ladder and reveal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows of rung slots in a generated ladder
    pub rows: usize,

    // === Reveal pacing ===
    /// Delay after each reveal step (ms)
    pub step_delay_ms: u64,
    /// Pause before the first step (ms)
    pub lead_in_ms: u64,
    /// Pause between the last step and the result (ms)
    pub settle_ms: u64,

    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
    /// Emit drum-roll tick cues during a draw
    pub tick_cues: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            step_delay_ms: STEP_DELAY_MS,
            lead_in_ms: LEAD_IN_MS,
            settle_ms: SETTLE_MS,
            seed: None,
            tick_cues: true,
        }
    }
}

impl Settings {
    /// Reveal pacing derived from the delay fields
    pub fn pacing(&self) -> RevealPacing {
        RevealPacing {
            lead_in: Duration::from_millis(self.lead_in_ms),
            step_delay: Duration::from_millis(self.step_delay_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ROWS).contains(&self.rows) {
            return Err(LadderError::Settings(format!(
                "rows must be between 1 and {MAX_ROWS}, got {}",
                self.rows
            )));
        }
        for (name, ms) in [
            ("step_delay_ms", self.step_delay_ms),
            ("lead_in_ms", self.lead_in_ms),
            ("settle_ms", self.settle_ms),
        ] {
            if ms > MAX_DELAY_MS {
                return Err(LadderError::Settings(format!(
                    "{name} must be at most {MAX_DELAY_MS}, got {ms}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| LadderError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LadderError::Settings(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LadderError::Settings(e.to_string()))
    }
}
