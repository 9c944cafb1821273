//! Runtime configuration.

use std::path::PathBuf;

use rukun_observability::LogFormat;
use rukun_store::RecoveryPolicy;
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "RUKUN_DATA_DIR";
pub const RECOVERY_VAR: &str = "RUKUN_RECOVERY";
pub const LOG_FORMAT_VAR: &str = "RUKUN_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share; set RUKUN_DATA_DIR"
    )]
    NoDataDir,

    #[error("invalid RUKUN_RECOVERY: {0}")]
    InvalidRecovery(String),

    #[error("invalid RUKUN_LOG_FORMAT: {0}")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    pub recovery: RecoveryPolicy,
    pub log_format: LogFormat,
}

impl DesktopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup` (the environment, in
    /// production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let recovery = match lookup(RECOVERY_VAR) {
            None => RecoveryPolicy::default(),
            Some(value) => value.parse().map_err(ConfigError::InvalidRecovery)?,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::Pretty,
            Some(value) => value.parse().map_err(ConfigError::InvalidLogFormat)?,
        };

        Ok(Self {
            data_dir,
            recovery,
            log_format,
        })
    }
}

/// `{app_data_dir}/rukun`.
fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;
    dir.push("rukun");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = DesktopConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/srv/rukun"),
            (RECOVERY_VAR, "reset"),
            (LOG_FORMAT_VAR, "json"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/rukun"));
        assert_eq!(config.recovery, RecoveryPolicy::ResetToEmpty);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_recovery_value_is_an_error() {
        let err = DesktopConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/srv/rukun"),
            (RECOVERY_VAR, "ignore"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRecovery(_)));
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        let err = DesktopConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/srv/rukun"),
            (LOG_FORMAT_VAR, "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat(_)));
    }

    #[test]
    fn defaults_are_fail_and_pretty() {
        let config = DesktopConfig::from_lookup(lookup(&[(DATA_DIR_VAR, "/srv/rukun")])).unwrap();
        assert_eq!(config.recovery, RecoveryPolicy::Fail);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn default_data_dir_ends_in_rukun() {
        if let Ok(config) = DesktopConfig::from_lookup(lookup(&[])) {
            assert!(config.data_dir.ends_with("rukun"));
        }
    }
}
