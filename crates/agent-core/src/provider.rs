//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for chat-completion backends so the
//! specialist agents never depend on a concrete HTTP client.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = OpenRouterProvider::new(config)?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Configuration for a single generation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "mistralai/mistral-7b-instruct:free")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 500 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "mistralai/mistral-7b-instruct:free".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationOptions {
    /// Same model, different sampling settings
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text; `None` when the backend returned no content at all
    pub content: Option<String>,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// Completion with only text and model, as returned by minimal backends
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// Generated text, empty when there was none
    pub fn text_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Token usage statistics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string
    pub fn from_api(reason: &str) -> Option<Self> {
        match reason {
            "stop" | "eos" => Some(Self::Stop),
            "length" => Some(Self::Length),
            "content_filter" => Some(Self::ContentFilter),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The agents work exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "OpenRouter")
    fn name(&self) -> &str;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.max_tokens, 500);
        assert_eq!(opts.model, "mistralai/mistral-7b-instruct:free");
    }

    #[test]
    fn test_with_sampling_keeps_model() {
        let opts = GenerationOptions {
            model: "openai/gpt-4o-mini".into(),
            ..Default::default()
        }
        .with_sampling(0.2, 1000);
        assert_eq!(opts.model, "openai/gpt-4o-mini");
        assert_eq!(opts.temperature, 0.2);
        assert_eq!(opts.max_tokens, 1000);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_api("stop"), Some(FinishReason::Stop));
        assert_eq!(FinishReason::from_api("length"), Some(FinishReason::Length));
        assert_eq!(FinishReason::from_api("whatever"), None);
        assert_eq!(FinishReason::from_api("tool_calls"), None);
    }

    #[test]
    fn test_text_or_empty() {
        let completion = Completion::text("hi", "m");
        assert_eq!(completion.text_or_empty(), "hi");

        let empty = Completion { content: None, ..completion };
        assert_eq!(empty.text_or_empty(), "");
    }
}
