//! # agent-runtime
//!
//! Runtime pieces for the health coaching agents: settings resolution,
//! the OpenRouter provider, and the shared client provider.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::{ClientProvider, Settings};
//!
//! let settings = Settings::load()?;
//! let clients = ClientProvider::new(settings.api.clone());
//! let client = clients.model_client()?;
//! ```

pub mod client;
pub mod error;
pub mod openrouter;
pub mod settings;

pub use client::ClientProvider;
pub use error::ConfigError;
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use settings::{
    ApiConfig, EmailConfig, EnvSource, ModelConfig, NotificationConfig, ProcessEnv,
    SecurityConfig, Settings,
};

// Re-export core types for convenience
pub use agent_core::{
    AgentError, GenerationOptions, LlmProvider, Message, ModelClient, Result, Role,
    SpecialistAgent, UserSessionContext,
};
