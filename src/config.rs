//! Session configuration
//!
//! Handles reading the reset settings from the environment.

use std::time::Duration;

use crate::error::ConfigError;

pub const RESET_DELAY_ENV: &str = "FORM_RESET_DELAY_MS";
pub const RESET_POLICY_ENV: &str = "FORM_RESET_POLICY";

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// What happens to a pending post-submit reset when the user types again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// The reset fires regardless and may wipe fresh input.
    #[default]
    Unconditional,
    /// Any input event cancels the pending reset.
    CancelOnInput,
}

impl ResetPolicy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim() {
            "unconditional" => Ok(ResetPolicy::Unconditional),
            "cancel-on-input" => Ok(ResetPolicy::CancelOnInput),
            other => Err(ConfigError::InvalidSetting {
                key: RESET_POLICY_ENV,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    pub reset_delay: Duration,
    pub reset_policy: ResetPolicy,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl FormConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `FORM_RESET_DELAY_MS`: delay before the form is cleared after a
    ///   successful submit (default: 3000)
    /// - `FORM_RESET_POLICY`: `unconditional` (default) or `cancel-on-input`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSetting` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(RESET_DELAY_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidSetting {
                key: RESET_DELAY_ENV,
                value: raw.clone(),
            })?;
            config.reset_delay = Duration::from_millis(millis);
        }

        if let Ok(raw) = std::env::var(RESET_POLICY_ENV) {
            config.reset_policy = ResetPolicy::parse(&raw)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Form config loaded: {:?}", config);

        Ok(config)
    }
}
