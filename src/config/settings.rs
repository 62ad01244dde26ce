use std::str::FromStr;

use crate::config::{ConfigError, EnvironmentProvider};

const DEFAULT_DATABASE_URL: &str = "sqlite://despachante.db?mode=rwc";
const DEFAULT_CONSULTA_API_URL: &str = "https://portaldespachantes.online";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Non-secret application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Base URL of the vehicle lookup vendor
    pub consulta_api_url: String,
    pub consulta_timeout_secs: u64,

    pub gemini_api_url: String,
    pub gemini_model: String,

    /// Requests allowed per (ip, endpoint) per window
    pub rate_limit_max_requests: i32,
    pub rate_limit_window_secs: i64,

    /// Failed logins in 24h that raise the security alert
    pub security_alert_threshold: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            consulta_api_url: DEFAULT_CONSULTA_API_URL.to_string(),
            consulta_timeout_secs: 30,
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            rate_limit_max_requests: 15,
            rate_limit_window_secs: 60,
            security_alert_threshold: 10,
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults for unset variables
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidFormat` when a numeric setting does not parse,
    /// or when a timeout, window or limit is not positive
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            database_url: env.get_non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            host: env.get_non_empty("HOST").unwrap_or(defaults.host),
            port: parse_or(env, "PORT", defaults.port, "port number")?,
            consulta_api_url: env
                .get_non_empty("CONSULTA_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.consulta_api_url),
            consulta_timeout_secs: parse_positive(
                env,
                "CONSULTA_TIMEOUT_SECS",
                defaults.consulta_timeout_secs,
                "positive seconds",
            )?,
            gemini_api_url: env
                .get_non_empty("GEMINI_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_api_url),
            gemini_model: env.get_non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            rate_limit_max_requests: parse_positive(
                env,
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
                "positive integer",
            )?,
            rate_limit_window_secs: parse_positive(
                env,
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
                "positive seconds",
            )?,
            security_alert_threshold: parse_positive(
                env,
                "SECURITY_ALERT_THRESHOLD",
                defaults.security_alert_threshold,
                "positive integer",
            )?,
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    env: &dyn EnvironmentProvider,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError> {
    match env.get_non_empty(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::invalid_format(key, expected, &raw)),
        None => Ok(default),
    }
}

fn parse_positive<T: FromStr + PartialOrd + Default>(
    env: &dyn EnvironmentProvider,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError> {
    let value = parse_or(env, key, default, expected)?;
    if value <= T::default() {
        let raw = env.get_non_empty(key).unwrap_or_default();
        return Err(ConfigError::invalid_format(key, expected, &raw));
    }
    Ok(value)
}
