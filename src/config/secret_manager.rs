use std::fmt;

use crate::config::{EnvironmentProvider, SecretConfig, SystemEnvironment};

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

const JWT_SECRET: SecretConfig = SecretConfig::env("JWT_SECRET").min_length(32);
const PASSWORD_PEPPER: SecretConfig = SecretConfig::env("PASSWORD_PEPPER").min_length(16);
const CHAVE_ACESSO_API: SecretConfig = SecretConfig::env("CHAVE_ACESSO_API").optional();
const GEMINI_API_KEY: SecretConfig = SecretConfig::env("GEMINI_API_KEY").optional();

/// Centralized manager for application secrets
///
/// JWT_SECRET and PASSWORD_PEPPER are mandatory. The vendor access key and the
/// Gemini key are optional: without them lookups fail with a configuration
/// error and the assistant answers from its static table.
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
    vendor_access_key: Option<String>,
    gemini_api_key: Option<String>,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with(&SystemEnvironment)
    }

    /// Load and validate all secrets from the given provider
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init_with(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env, &JWT_SECRET)?;
        let password_pepper = Self::load_secret(env, &PASSWORD_PEPPER)?;
        let vendor_access_key = Self::load_optional(env, &CHAVE_ACESSO_API)?;
        let gemini_api_key = Self::load_optional(env, &GEMINI_API_KEY)?;

        Ok(Self {
            jwt_secret,
            password_pepper,
            vendor_access_key,
            gemini_api_key,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn vendor_access_key(&self) -> Option<&str> {
        self.vendor_access_key.as_deref()
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    fn load_optional(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<Option<String>, SecretError> {
        let value = Self::load_secret(env, config)?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match env.get_non_empty(config.name) {
            Some(v) => v,
            None if !config.required => return Ok(String::new()),
            None => return Err(SecretError::missing(config.name)),
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(
                    config.name,
                    min_len,
                    value.len(),
                ));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field(
                "vendor_access_key",
                &self.vendor_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SecretManager {{ vendor_access_key: {}, gemini_api_key: {} }}",
            self.vendor_access_key.is_some(),
            self.gemini_api_key.is_some()
        )
    }
}
