//! OpenRouter LLM Provider
//!
//! Implementation of `LlmProvider` for the OpenRouter chat-completions API
//! (OpenAI compatible). One request per call; no retries.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::ApiConfig;

/// Request timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenRouter provider configuration
#[derive(Clone, Debug)]
pub struct OpenRouterConfig {
    pub api: ApiConfig,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl From<ApiConfig> for OpenRouterConfig {
    fn from(api: ApiConfig) -> Self {
        Self {
            api,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenRouter LLM provider
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterProvider {
    /// Build a provider; the API key and attribution headers are sent on every request
    pub fn new(config: impl Into<OpenRouterConfig>) -> std::result::Result<Self, ConfigError> {
        let config = config.into();
        let headers = Self::default_headers(&config.api)?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_headers(api: &ApiConfig) -> std::result::Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        let mut auth = header_value("OPENROUTER_API_KEY", &format!("Bearer {}", api.api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(HeaderName::from_static("http-referer"), header_value("SITE_URL", &api.site_url)?);
        headers.insert(HeaderName::from_static("x-title"), header_value("APP_NAME", &api.app_name)?);

        Ok(headers)
    }

    /// Convert the API reply to a completion
    fn convert_completion(response: ChatResponse, requested_model: &str) -> Result<Completion> {
        if let Some(error) = response.error {
            return Err(AgentError::Provider(error.message));
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Parse("No choices in response".into()))?;

        Ok(Completion {
            content: choice.message.content,
            model: response.model.unwrap_or_else(|| requested_model.to_string()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.as_deref().and_then(FinishReason::from_api),
        })
    }

    fn status_error(status: StatusCode, body: String) -> AgentError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(body),
            _ => AgentError::Provider(format!("OpenRouter API error ({}): {}", status, body)),
        }
    }
}

fn header_value(key: &str, value: &str) -> std::result::Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: if key == "OPENROUTER_API_KEY" { "<redacted>".into() } else { value.to_string() },
    })
}

fn transport_error(e: reqwest::Error) -> AgentError {
    if e.is_timeout() || e.is_connect() {
        AgentError::ProviderUnavailable(e.to_string())
    } else {
        AgentError::Provider(e.to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "OpenRouter"
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("OpenRouter health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(%status, "OpenRouter request failed");
            return Err(Self::status_error(status, body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(format!("Failed to parse response: {}", e)))?;

        let completion = Self::convert_completion(body, &options.model)?;
        tracing::debug!(
            model = %completion.model,
            chars = completion.text_or_empty().len(),
            "completion received"
        );
        Ok(completion)
    }
}

// Wire types

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
