use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page-level configuration for every enhancer.
///
/// All sections default independently, so a page override only has to name
/// the values it changes, e.g. `{"toast": {"error_duration_ms": 10000}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub toast: ToastConfig,
    pub modal: ModalConfig,
    pub validation: ValidationConfig,
    pub log: LogConfig,
}

impl UiConfig {
    /// Parse an override block. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: UiConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toast.exit_transition_ms == 0 {
            return Err(ConfigError::Invalid("toast.exit_transition_ms must be positive".to_string()));
        }
        if self.modal.exit_transition_ms == 0 {
            return Err(ConfigError::Invalid("modal.exit_transition_ms must be positive".to_string()));
        }
        if self.validation.max_amount <= 0.0 {
            return Err(ConfigError::Invalid("validation.max_amount must be positive".to_string()));
        }
        if self.validation.min_age_years > self.validation.max_age_years {
            return Err(ConfigError::Invalid("validation.min_age_years exceeds max_age_years".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ui config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid ui config: {0}")]
    Invalid(String),
}

/// Notification queue timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub success_duration_ms: u32,
    pub info_duration_ms: u32,
    pub warning_duration_ms: u32,
    pub error_duration_ms: u32,
    /// Deadline set when the pointer leaves a hovered toast
    pub hover_grace_ms: u32,
    pub exit_transition_ms: u32,
    /// Delay between consecutive flash messages on page load
    pub flash_stagger_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            success_duration_ms: 5000,
            info_duration_ms: 5000,
            warning_duration_ms: 6000,
            error_duration_ms: 7000,
            hover_grace_ms: 2000,
            exit_transition_ms: 300,
            flash_stagger_ms: 200,
        }
    }
}

/// Confirmation modal timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Delay before the entry classes are swapped in
    pub entry_delay_ms: u32,
    pub entry_transition_ms: u32,
    pub exit_transition_ms: u32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            entry_delay_ms: 10,
            entry_transition_ms: 200,
            exit_transition_ms: 200,
        }
    }
}

/// Client-side limits mirrored from the server forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_amount: f64,
    pub min_name_length: usize,
    pub min_age_years: i32,
    pub max_age_years: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_amount: 99_999_999.99,
            min_name_length: 2,
            min_age_years: 18,
            max_age_years: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub min_level: LogLevel,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = UiConfig::from_json(r#"{"toast": {"error_duration_ms": 10000}, "log": {"min_level": "debug"}}"#).unwrap();
        assert_eq!(config.toast.error_duration_ms, 10000);
        assert_eq!(config.toast.success_duration_ms, 5000);
        assert_eq!(config.toast.hover_grace_ms, 2000);
        assert_eq!(config.modal, ModalConfig::default());
        assert_eq!(config.log.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_block_is_default() {
        assert_eq!(UiConfig::from_json("  ").unwrap(), UiConfig::default());
        assert_eq!(UiConfig::from_json("{}").unwrap(), UiConfig::default());
    }

    #[test]
    fn test_rejects_bad_json_and_bad_values() {
        assert!(matches!(UiConfig::from_json("{toast"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            UiConfig::from_json(r#"{"modal": {"exit_transition_ms": 0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            UiConfig::from_json(r#"{"validation": {"min_age_years": 130}}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
