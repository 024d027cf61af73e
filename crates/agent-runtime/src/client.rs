//! Shared Client Provider
//!
//! Owns the resolved API configuration and lazily builds the one LLM client
//! every agent shares. Construct it once at start-up and hand it to each
//! agent constructor by reference.

use std::sync::{Arc, OnceLock};

use agent_core::{GenerationOptions, LlmProvider, ModelClient};

use crate::error::Result;
use crate::openrouter::OpenRouterProvider;
use crate::settings::{ApiConfig, ModelConfig};

pub struct ClientProvider {
    api: ApiConfig,
    client: OnceLock<Arc<dyn LlmProvider>>,
}

impl ClientProvider {
    /// The OpenRouter client is built on the first call to [`ClientProvider::client`]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            client: OnceLock::new(),
        }
    }

    /// Use an existing provider instead of building an OpenRouter client
    pub fn with_client(api: ApiConfig, client: Arc<dyn LlmProvider>) -> Self {
        Self {
            api,
            client: OnceLock::from(client),
        }
    }

    /// Resolve the API configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api
    }

    pub fn model_config(&self) -> ModelConfig {
        self.api.model_config()
    }

    /// The shared client. Built once; later calls return the same instance.
    pub fn client(&self) -> Result<Arc<dyn LlmProvider>> {
        if let Some(client) = self.client.get() {
            return Ok(Arc::clone(client));
        }

        tracing::info!(base_url = %self.api.base_url, model = %self.api.model, "initializing OpenRouter client");
        let built: Arc<dyn LlmProvider> = Arc::new(OpenRouterProvider::new(self.api.clone())?);
        Ok(Arc::clone(self.client.get_or_init(|| built)))
    }

    /// Shared client bundled with the configured generation options
    pub fn model_client(&self) -> Result<ModelClient> {
        Ok(ModelClient::new(
            self.client()?,
            GenerationOptions::from(self.model_config()),
        ))
    }

    /// Whether the client has been built yet
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }
}

impl std::fmt::Debug for ClientProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientProvider")
            .field("api", &self.api)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
