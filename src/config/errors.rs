use std::fmt;

use crate::config::SecretError;

/// Startup configuration failures
#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat { setting_name: String, expected: String, actual: String },
    Secret(SecretError),
}

impl ConfigError {
    pub fn invalid_format(setting_name: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidFormat {
            setting_name: setting_name.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { setting_name, expected, actual } => {
                write!(
                    f,
                    "Setting '{}' has invalid format. Expected: {}, got: {}",
                    setting_name, expected, actual
                )
            }
            Self::Secret(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<SecretError> for ConfigError {
    fn from(err: SecretError) -> Self {
        Self::Secret(err)
    }
}
