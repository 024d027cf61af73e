//! Injury Support Agent
//!
//! Safety-first exercise modifications and recovery guidance.

use std::sync::Arc;

use agent_core::{
    GenerationOptions, LlmProvider, ModelClient, Result, SpecialistAgent, UserSessionContext,
};
use agent_runtime::{ClientProvider, ModelConfig};
use async_trait::async_trait;

use crate::prompts::{INJURY_SUPPORT_SYSTEM_PROMPT, advice_message, injury_context};
use crate::response::{AdviceKind, AdviceResponse};

/// Fitness level assumed when the session has none
pub const DEFAULT_FITNESS_LEVEL: &str = "beginner";

#[derive(Debug)]
pub struct InjurySupportAgent {
    client: ModelClient,
}

impl InjurySupportAgent {
    pub const NAME: &'static str = "injury_support";
    pub const DESCRIPTION: &'static str =
        "Specialized agent for handling injury-related queries and providing safe exercise modifications";

    pub fn new(clients: &ClientProvider) -> Result<Self> {
        Ok(Self::with_client(clients.model_client()?))
    }

    pub fn with_client(client: ModelClient) -> Self {
        Self { client }
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>, model: &ModelConfig) -> Self {
        Self::with_client(ModelClient::new(provider, GenerationOptions::from(model)))
    }
}

#[async_trait]
impl SpecialistAgent for InjurySupportAgent {
    type Response = AdviceResponse;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn on_handoff(&self, context: &mut UserSessionContext) -> Result<()> {
        tracing::info!(session = %context.id, agent = Self::NAME, "handoff");
        context.log_handoff(format!("Control handed to {} agent", Self::NAME));

        if context.ensure_injuries() {
            tracing::debug!(session = %context.id, "initialized injuries");
        }
        if context.ensure_fitness_level(DEFAULT_FITNESS_LEVEL) {
            tracing::debug!(session = %context.id, "initialized fitness level");
        }
        Ok(())
    }

    async fn handle_request(
        &self,
        context: &UserSessionContext,
        query: &str,
    ) -> Result<AdviceResponse> {
        tracing::info!(session = %context.id, agent = Self::NAME, "handling request");
        let user = advice_message(&injury_context(context), query);
        let completion = self.client.ask(INJURY_SUPPORT_SYSTEM_PROMPT, &user).await?;
        Ok(AdviceResponse::new(completion.content.unwrap_or_default(), AdviceKind::InjurySupport))
    }
}
