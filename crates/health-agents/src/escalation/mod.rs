//! Escalation Agent
//!
//! Hands a user over to a human coach. One model call produces a
//! coach-matching recommendation as JSON; a reply that is not JSON at all
//! is replaced by a fixed default, anything else malformed is an error.

mod recommendation;
mod response;

pub use recommendation::{
    CoachRequirements, Recommendation, RecommendationOutcome, SessionRecommendations,
};
pub use response::{
    CoachMatching, ESCALATED, ESCALATION_MESSAGE, EscalationDetails, EscalationResponse,
    RecommendationSource, SessionPlan,
};

use agent_core::{
    AgentError, GenerationOptions, LlmProvider, ModelClient, Result, SpecialistAgent, UserSessionContext,
};
use agent_runtime::{ClientProvider, ModelConfig};
use async_trait::async_trait;
use std::sync::Arc;

use crate::prompts::{ESCALATION_SYSTEM_PROMPT, escalation_context};

/// Sampling for the coach-matching call, independent of the configured model defaults
pub const ESCALATION_TEMPERATURE: f32 = 0.7;
pub const ESCALATION_MAX_TOKENS: u32 = 1000;

#[derive(Debug)]
pub struct EscalationAgent {
    client: ModelClient,
}

impl EscalationAgent {
    pub const NAME: &'static str = "escalation";
    pub const DESCRIPTION: &'static str = "Handles escalation to human coaches";

    /// Build from the shared client provider
    pub fn new(clients: &ClientProvider) -> Result<Self> {
        Ok(Self::with_client(clients.model_client()?))
    }

    pub fn with_client(client: ModelClient) -> Self {
        Self { client }
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>, model: &ModelConfig) -> Self {
        Self::with_client(ModelClient::new(provider, GenerationOptions::from(model)))
    }

    fn options(&self) -> GenerationOptions {
        self.client
            .options()
            .clone()
            .with_sampling(ESCALATION_TEMPERATURE, ESCALATION_MAX_TOKENS)
    }

    /// Ask the model for a coach-matching recommendation
    pub async fn recommend(
        &self,
        context: &UserSessionContext,
        query: &str,
    ) -> Result<RecommendationOutcome> {
        let user = escalation_context(context, query);
        let completion = self
            .client
            .ask_with(ESCALATION_SYSTEM_PROMPT, &user, &self.options())
            .await?;

        let text = completion
            .content
            .as_deref()
            .ok_or_else(|| AgentError::Parse("model returned no content".into()))?;
        let outcome = RecommendationOutcome::from_completion(text)?;
        if let RecommendationOutcome::Fallback { error, .. } = &outcome {
            tracing::warn!(
                session = %context.id,
                error = %error,
                "model reply was not JSON, using default coach recommendation"
            );
        }
        Ok(outcome)
    }
}

#[async_trait]
impl SpecialistAgent for EscalationAgent {
    type Response = EscalationResponse;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn on_handoff(&self, context: &mut UserSessionContext) -> Result<()> {
        tracing::info!(session = %context.id, agent = Self::NAME, "handoff");
        context.log_handoff(format!(
            "Control handed to {} agent for human coach escalation",
            Self::NAME
        ));
        Ok(())
    }

    async fn handle_request(
        &self,
        context: &UserSessionContext,
        query: &str,
    ) -> Result<EscalationResponse> {
        tracing::info!(session = %context.id, agent = Self::NAME, "handling request");
        let outcome = self.recommend(context, query).await?;
        EscalationResponse::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::mock::ScriptedProvider;
    use agent_core::Role;
    use serde_json::json;

    fn agent(provider: &Arc<ScriptedProvider>) -> EscalationAgent {
        EscalationAgent::with_provider(provider.clone(), &ModelConfig::default())
    }

    fn context() -> UserSessionContext {
        {
            let mut ctx = UserSessionContext::default();
            ctx.goal = Some("Lose 10kg".into());
            ctx.fitness_level = Some("beginner".into());
            ctx.injuries = Some(vec!["lower back".into()]);
            ctx
        }
    }

    fn full_reply() -> serde_json::Value {
        json!({
            "escalation_reason": "Back pain needs supervised programming",
            "priority_level": "high",
            "coach_requirements": {
                "specialties": ["Corrective exercise", "Weight loss"],
                "experience_level": "senior",
                "certifications": ["NASM-CES"]
            },
            "session_recommendations": {
                "format": "audio",
                "duration": "45",
                "frequency": "2 per week"
            },
            "preparation_checklist": ["Pain diary"],
            "success_metrics": ["Pain below 3/10"]
        })
    }

    #[tokio::test]
    async fn test_invalid_json_returns_fallback() {
        let provider = Arc::new(ScriptedProvider::new().reply("I think you need a coach!"));
        let response = agent(&provider).handle_request(&context(), "get me a coach").await.unwrap();

        assert_eq!(response.status, "escalated");
        assert_eq!(response.escalation_details.priority, "medium");
        assert_eq!(response.session_plan.format, "video");
        assert_eq!(response.session_plan.duration_minutes, 30);
        assert_eq!(response.session_plan.frequency, "1 per week");
        assert_eq!(response.source, RecommendationSource::Fallback);
    }

    #[tokio::test]
    async fn test_valid_json_is_reshaped() {
        let provider = Arc::new(ScriptedProvider::new().reply(full_reply().to_string()));
        let response = agent(&provider).handle_request(&context(), "get me a coach").await.unwrap();

        assert_eq!(response.message, ESCALATION_MESSAGE);
        assert_eq!(response.escalation_details.reason, "Back pain needs supervised programming");
        assert_eq!(response.escalation_details.priority, "high");
        assert_eq!(
            response.coach_matching.required_specialties,
            ["Corrective exercise", "Weight loss"]
        );
        assert_eq!(response.coach_matching.experience_level, "senior");
        assert_eq!(response.coach_matching.certifications, ["NASM-CES"]);
        assert_eq!(response.session_plan.format, "audio");
        assert_eq!(response.session_plan.duration_minutes, 45);
        assert_eq!(response.session_plan.frequency, "2 per week");
        assert_eq!(response.preparation, ["Pain diary"]);
        assert_eq!(response.success_metrics, ["Pain below 3/10"]);
        assert_eq!(response.source, RecommendationSource::Model);
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let mut reply = full_reply();
        reply.as_object_mut().unwrap().remove("priority_level");
        let provider = Arc::new(ScriptedProvider::new().reply(reply.to_string()));

        let err = agent(&provider).handle_request(&context(), "coach").await.unwrap_err();
        assert!(matches!(err, AgentError::MissingField(path) if path == "priority_level"));
    }

    #[tokio::test]
    async fn test_missing_content_is_error_not_fallback() {
        let provider = Arc::new(ScriptedProvider::new().no_content());
        let err = agent(&provider).handle_request(&context(), "coach").await.unwrap_err();
        assert!(matches!(err, AgentError::Parse(_)));
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let provider = Arc::new(
            ScriptedProvider::new().fail(AgentError::ProviderUnavailable("connection refused".into())),
        );
        let err = agent(&provider).handle_request(&context(), "coach").await.unwrap_err();
        assert!(matches!(err, AgentError::ProviderUnavailable(_)));
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_request_uses_fixed_sampling() {
        let provider = Arc::new(ScriptedProvider::new().reply("not json"));
        let model = ModelConfig {
            model: "openai/gpt-4o-mini".into(),
            temperature: 0.1,
            max_tokens: 200,
        };
        let agent = EscalationAgent::with_provider(provider.clone(), &model);
        agent.handle_request(&context(), "coach please").await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.options.model, "openai/gpt-4o-mini");
        assert_eq!(request.options.temperature, ESCALATION_TEMPERATURE);
        assert_eq!(request.options.max_tokens, ESCALATION_MAX_TOKENS);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, ESCALATION_SYSTEM_PROMPT);
        assert!(request.messages[1].content.contains("User Goal: Lose 10kg"));
        assert!(request.messages[1].content.contains("Injuries: lower back"));
        assert!(request.messages[1].content.ends_with("Query: coach please"));
    }

    #[tokio::test]
    async fn test_handoff_only_logs() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut ctx = UserSessionContext::new();
        agent(&provider).on_handoff(&mut ctx).await.unwrap();

        assert_eq!(ctx.handoff_log().len(), 1);
        assert_eq!(
            ctx.handoff_log()[0].message,
            "Control handed to escalation agent for human coach escalation"
        );
        assert!(ctx.injuries.is_none());
        assert!(ctx.fitness_level.is_none());
        assert_eq!(provider.call_count().await, 0);
    }
}
