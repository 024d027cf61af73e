//! Specialist Agents
//!
//! A specialist turns a user query plus the session context into exactly
//! one model call and a structured response. The orchestrator that picks
//! a specialist lives outside this crate; it calls [`SpecialistAgent::on_handoff`]
//! once when routing a session here, then [`SpecialistAgent::handle_request`]
//! for each query.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::message::prompt;
use crate::provider::{Completion, GenerationOptions, LlmProvider};
use crate::session::UserSessionContext;

/// Common interface of every specialist
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    /// Agent-specific response shape
    type Response: Serialize + Send;

    /// Stable identifier used in logs and handoff messages
    fn name(&self) -> &'static str;

    /// One-line description for routing
    fn description(&self) -> &'static str;

    /// Called when control of the session is handed to this agent
    async fn on_handoff(&self, context: &mut UserSessionContext) -> Result<()>;

    /// Answer one query
    async fn handle_request(
        &self,
        context: &UserSessionContext,
        query: &str,
    ) -> Result<Self::Response>;
}

/// Shared model handle plus the default generation options.
///
/// Cloning is cheap; every clone talks to the same provider instance.
#[derive(Clone)]
pub struct ModelClient {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl ModelClient {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Send one system + user prompt with the default options
    pub async fn ask(&self, system: &str, user: &str) -> Result<Completion> {
        self.ask_with(system, user, &self.options).await
    }

    /// Send one system + user prompt with explicit options
    pub async fn ask_with(
        &self,
        system: &str,
        user: &str,
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let messages = prompt(system, user);
        tracing::debug!(
            provider = self.provider.name(),
            model = %options.model,
            temperature = options.temperature,
            max_tokens = options.max_tokens,
            prompt_tokens = messages.iter().map(|m| m.estimate_tokens()).sum::<u32>(),
            "sending completion request"
        );
        self.provider.complete(&messages, options).await
    }
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("provider", &self.provider.name())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::mock::ScriptedProvider;

    #[tokio::test]
    async fn test_ask_sends_system_then_user() {
        let provider = Arc::new(ScriptedProvider::new().reply("ok"));
        let client = ModelClient::new(provider.clone(), GenerationOptions::default());

        let completion = client.ask("be brief", "hello").await.unwrap();
        assert_eq!(completion.text_or_empty(), "ok");

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert_eq!(requests[0].messages[0].content, "be brief");
        assert_eq!(requests[0].messages[1].content, "hello");
        assert_eq!(requests[0].options, GenerationOptions::default());
    }

    #[tokio::test]
    async fn test_ask_with_overrides_options() {
        let provider = Arc::new(ScriptedProvider::new().reply("ok"));
        let client = ModelClient::new(provider.clone(), GenerationOptions::default());
        let options = client.options().clone().with_sampling(0.1, 42);

        client.ask_with("s", "u", &options).await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests[0].options.max_tokens, 42);
    }
}
