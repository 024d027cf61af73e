//! Application Settings
//!
//! Resolves API credentials, model parameters, and the auxiliary email /
//! notification / security settings from environment variables. Values are
//! read through [`EnvSource`] so resolution can be tested against a plain map
//! instead of the process environment.

use std::collections::HashMap;
use std::fmt;

use agent_core::GenerationOptions;

use crate::error::{ConfigError, Result};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_APP_NAME: &str = "HealthAgent";
pub const DEFAULT_SITE_URL: &str = "http://localhost:8501";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_EMAIL_SERVICE: &str = "smtp.gmail.com";
pub const DEFAULT_EMAIL_PORT: &str = "587";

/// A source of configuration values keyed by variable name
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|v| (*v).to_string())
    }
}

/// Read a variable that must be present and non-blank
pub fn get_required(source: &impl EnvSource, key: &str) -> Result<String> {
    tracing::debug!(key, "reading required setting");
    match source.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(key.to_string())),
    }
}

/// Read a variable, falling back to `default` when unset
pub fn get_optional(source: &impl EnvSource, key: &str, default: &str) -> String {
    tracing::debug!(key, "reading optional setting");
    source.get(key).unwrap_or_else(|| default.to_string())
}

fn get_parsed<T: std::str::FromStr>(source: &impl EnvSource, key: &str, default: T) -> Result<T> {
    match source.get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

/// Model parameters sent with every completion request
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&ModelConfig> for GenerationOptions {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl From<ModelConfig> for GenerationOptions {
    fn from(config: ModelConfig) -> Self {
        Self::from(&config)
    }
}

/// OpenRouter connection settings
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub app_name: String,
    pub site_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &impl EnvSource) -> Result<Self> {
        Ok(Self {
            api_key: get_required(source, "OPENROUTER_API_KEY")?,
            base_url: OPENROUTER_BASE_URL.into(),
            app_name: get_optional(source, "APP_NAME", DEFAULT_APP_NAME),
            site_url: get_optional(source, "SITE_URL", DEFAULT_SITE_URL),
            model: get_optional(source, "AI_MODEL", DEFAULT_MODEL),
            temperature: get_parsed(source, "AI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            max_tokens: get_parsed(source, "AI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The subset consumed by every agent call
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("app_name", &self.app_name)
            .field("site_url", &self.site_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub service: String,
    pub port: String,
    pub user: String,
    pub password: String,
}

impl EmailConfig {
    pub fn from_source(source: &impl EnvSource) -> Self {
        Self {
            service: get_optional(source, "EMAIL_SERVICE", DEFAULT_EMAIL_SERVICE),
            port: get_optional(source, "EMAIL_PORT", DEFAULT_EMAIL_PORT),
            user: get_optional(source, "EMAIL_USER", ""),
            password: get_optional(source, "EMAIL_PASSWORD", ""),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("service", &self.service)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub push_key: String,
    pub sms_key: String,
}

impl NotificationConfig {
    pub fn from_source(source: &impl EnvSource) -> Self {
        Self {
            push_key: get_optional(source, "PUSH_NOTIFICATION_KEY", ""),
            sms_key: get_optional(source, "SMS_API_KEY", ""),
        }
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("push_key", &redact(&self.push_key))
            .field("sms_key", &redact(&self.sms_key))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub encryption_key: String,
}

impl SecurityConfig {
    pub fn from_source(source: &impl EnvSource) -> Result<Self> {
        Ok(Self {
            jwt_secret: get_required(source, "JWT_SECRET")?,
            encryption_key: get_required(source, "ENCRYPTION_KEY")?,
        })
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &redact(&self.jwt_secret))
            .field("encryption_key", &redact(&self.encryption_key))
            .finish()
    }
}

/// Every setting the application reads
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api: ApiConfig,
    pub email: EmailConfig,
    pub notifications: NotificationConfig,
    pub security: SecurityConfig,
}

impl Settings {
    /// Load `.env` (if present) and resolve everything from the process environment
    pub fn load() -> Result<Self> {
        load_dotenv();
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &impl EnvSource) -> Result<Self> {
        Ok(Self {
            api: ApiConfig::from_source(source)?,
            email: EmailConfig::from_source(source),
            notifications: NotificationConfig::from_source(source),
            security: SecurityConfig::from_source(source)?,
        })
    }

    pub fn model_config(&self) -> ModelConfig {
        self.api.model_config()
    }
}

/// Load a `.env` file from the working directory or its parents.
///
/// Variables already set in the environment win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!("failed to load .env file: {}", e),
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}
