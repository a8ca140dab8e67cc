//! Runtime configuration from the environment.
//!
//! `.env` is loaded first when present, then each setting is read from its
//! variable. Unset variables fall back to defaults; malformed ones are errors.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::credential::{DEFAULT_LENGTH, MIN_LENGTH};

/// Directory holding employee documents when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".hrms";
/// Store writes attempted per onboarding when none is configured.
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 3;

/// Configuration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
        /// Parse or range failure.
        reason: String,
    },
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the file-backed employee store.
    pub data_dir: PathBuf,
    /// Length of generated temporary passwords.
    pub password_length: usize,
    /// How many times onboarding re-allocates after a write conflict.
    pub write_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            password_length: DEFAULT_LENGTH,
            write_attempts: DEFAULT_WRITE_ATTEMPTS,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any malformed variable.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => info!("ignoring unreadable .env: {e}"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any malformed variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let password_length = try_load(&lookup, "HRMS_PASSWORD_LENGTH", defaults.password_length)?;
        if password_length < MIN_LENGTH {
            return Err(ConfigError::Invalid {
                key: "HRMS_PASSWORD_LENGTH",
                value: password_length.to_string(),
                reason: format!("must be at least {MIN_LENGTH}"),
            });
        }
        let write_attempts = try_load(&lookup, "HRMS_WRITE_ATTEMPTS", defaults.write_attempts)?;
        if write_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "HRMS_WRITE_ATTEMPTS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            data_dir: try_load(&lookup, "HRMS_DATA_DIR", defaults.data_dir)?,
            password_length,
            write_attempts,
        })
    }

    /// Replaces the data directory, e.g. from `--data-dir`.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        info!("{key} not set, using default: {default:?}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(from(&[]).unwrap(), Config::default());
        assert_eq!(Config::default().password_length, 12);
        assert_eq!(Config::default().data_dir, PathBuf::from(".hrms"));
    }

    #[test]
    fn reads_every_variable() {
        let config = from(&[
            ("HRMS_DATA_DIR", "/var/lib/hrms"),
            ("HRMS_PASSWORD_LENGTH", " 16 "),
            ("HRMS_WRITE_ATTEMPTS", "5"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/hrms"));
        assert_eq!(config.password_length, 16);
        assert_eq!(config.write_attempts, 5);
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let err = from(&[("HRMS_PASSWORD_LENGTH", "twelve")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HRMS_PASSWORD_LENGTH", .. }));
    }

    #[test]
    fn out_of_range_values_are_errors() {
        assert!(from(&[("HRMS_PASSWORD_LENGTH", "3")]).is_err());
        assert!(from(&[("HRMS_WRITE_ATTEMPTS", "0")]).is_err());
    }

    #[test]
    fn data_dir_override_wins() {
        let config = from(&[("HRMS_DATA_DIR", "/env")])
            .unwrap()
            .with_data_dir(Some(PathBuf::from("/flag")));
        assert_eq!(config.data_dir, PathBuf::from("/flag"));
        assert_eq!(Config::default().with_data_dir(None), Config::default());
    }
}
