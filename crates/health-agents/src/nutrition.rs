//! Nutrition Expert Agent

use std::sync::Arc;

use agent_core::{
    GenerationOptions, LlmProvider, ModelClient, Result, SpecialistAgent, UserSessionContext,
};
use agent_runtime::{ClientProvider, ModelConfig};
use async_trait::async_trait;

use crate::prompts::{NUTRITION_EXPERT_SYSTEM_PROMPT, advice_message, nutrition_context};
use crate::response::{AdviceKind, AdviceResponse};

#[derive(Debug)]
pub struct NutritionExpertAgent {
    client: ModelClient,
}

impl NutritionExpertAgent {
    pub const NAME: &'static str = "nutrition_expert";
    pub const DESCRIPTION: &'static str =
        "Specialized agent for handling complex dietary needs and restrictions";

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
impl SpecialistAgent for NutritionExpertAgent {
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
        context.ensure_dietary_preferences();
        context.ensure_allergies();
        Ok(())
    }

    async fn handle_request(
        &self,
        context: &UserSessionContext,
        query: &str,
    ) -> Result<AdviceResponse> {
        tracing::info!(session = %context.id, agent = Self::NAME, "handling request");
        let user = advice_message(&nutrition_context(context), query);
        let completion = self.client.ask(NUTRITION_EXPERT_SYSTEM_PROMPT, &user).await?;
        Ok(AdviceResponse::new(completion.content.unwrap_or_default(), AdviceKind::NutritionAdvice))
    }
}
