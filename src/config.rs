//! Process configuration read from environment variables.

use std::env;
use thiserror::Error;

/// Default chat-completions endpoint.
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Default model name.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
/// Default sampling temperature.
pub const DEFAULT_MODEL_TEMPERATURE: f32 = 0.2;
/// Default database connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 4;

const MAX_TEMPERATURE: f32 = 2.0;

/// Configuration failures, naming the offending variable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    /// A variable could not be parsed.
    #[error("{variable} is invalid: {reason}")]
    Invalid {
        /// Variable name.
        variable: &'static str,
        /// Parse failure.
        reason: String,
    },
}

/// Runtime settings for the review service.
#[derive(Clone, PartialEq)]
pub struct AssessorConfig {
    /// Shared secret required on every operation.
    pub agent_api_key: String,
    /// Admin password; admin login is disabled when absent.
    pub admin_password: Option<String>,
    /// Model service bearer token.
    pub model_api_key: String,
    /// Chat-completions URL.
    pub model_endpoint: String,
    /// Model name.
    pub model_name: String,
    /// Sampling temperature.
    pub model_temperature: f32,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    pub database_pool_size: u32,
}

impl AssessorConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| read(name).ok_or(ConfigError::Missing(name));

        let model_temperature = match read("MODEL_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_MODEL_TEMPERATURE,
        };
        let database_pool_size = match read("DATABASE_POOL_SIZE") {
            Some(raw) => parse_pool_size(&raw)?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            agent_api_key: required("AGENT_API_KEY")?,
            admin_password: read("ADMIN_PASSWORD"),
            model_api_key: required("MODEL_API_KEY")?,
            model_endpoint: read("MODEL_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_owned()),
            model_name: read("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_owned()),
            model_temperature,
            database_url: required("DATABASE_URL")?,
            database_pool_size,
        })
    }
}

impl std::fmt::Debug for AssessorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessorConfig")
            .field("admin_login_enabled", &self.admin_password.is_some())
            .field("model_endpoint", &self.model_endpoint)
            .field("model_name", &self.model_name)
            .field("model_temperature", &self.model_temperature)
            .field("database_pool_size", &self.database_pool_size)
            .finish_non_exhaustive()
    }
}

fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        variable: "MODEL_TEMPERATURE",
        reason,
    };
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|err| invalid(err.to_string()))?;
    if (0.0..=MAX_TEMPERATURE).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(format!("must be between 0 and {MAX_TEMPERATURE}")))
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        variable: "DATABASE_POOL_SIZE",
        reason,
    };
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(invalid("must be at least 1".to_owned())),
        Ok(size) => Ok(size),
        Err(err) => Err(invalid(err.to_string())),
    }
}
