use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

fn default_debounce_ms() -> u64 {
    300
}
fn default_success_banner_ms() -> u64 {
    3_000
}
fn default_error_banner_ms() -> u64 {
    5_000
}
fn default_reset_delay_ms() -> u64 {
    1_000
}

/// Timing configuration for one engine instance.
///
/// All durations are millisecond-granularity. Partial config files fill
/// missing fields with the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quiet period after an input event before the field is validated.
    /// Zero means validate on every input event.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long a success banner stays visible.
    #[serde(default = "default_success_banner_ms")]
    pub success_banner_ms: u64,

    /// How long an error banner stays visible.
    #[serde(default = "default_error_banner_ms")]
    pub error_banner_ms: u64,

    /// Delay between a successful submission and the automatic form reset.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            success_banner_ms: default_success_banner_ms(),
            error_banner_ms: default_error_banner_ms(),
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration at construction time.
    ///
    /// Banner durations and the reset delay must be positive; a zero
    /// debounce is legal and means per-keystroke validation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.success_banner_ms == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "success_banner_ms must be positive".into(),
            });
        }
        if self.error_banner_ms == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "error_banner_ms must be positive".into(),
            });
        }
        if self.reset_delay_ms == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "reset_delay_ms must be positive".into(),
            });
        }
        Ok(())
    }

    /// Debounce quiet period.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Success banner visibility.
    #[must_use]
    pub fn success_banner(&self) -> Duration {
        Duration::from_millis(self.success_banner_ms)
    }

    /// Error banner visibility.
    #[must_use]
    pub fn error_banner(&self) -> Duration {
        Duration::from_millis(self.error_banner_ms)
    }

    /// Delay before the post-success reset.
    #[must_use]
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}
