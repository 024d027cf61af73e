//! Configuration Errors

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ConfigError {
    /// The environment variable at fault, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingEnv(key) | ConfigError::InvalidValue { key, .. } => Some(key),
            ConfigError::Client(_) => None,
        }
    }
}

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}
