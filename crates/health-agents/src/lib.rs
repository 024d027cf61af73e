//! # health-agents
//!
//! Specialist agents for a health coaching assistant. Each one is a thin
//! wrapper around a single OpenRouter completion, sharing one HTTP client.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ClientProvider (settings + memoized OpenRouter client)      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  EscalationAgent      → JSON coach match → EscalationResponse │
//! │  InjurySupportAgent   → free text        → injury_support     │
//! │  NutritionExpertAgent → free text        → nutrition_advice   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Routing between specialists is the caller's job: call `on_handoff` when
//! control moves to an agent, then `handle_request` for each query.

pub mod escalation;
pub mod injury;
pub mod nutrition;
pub mod prompts;
pub mod response;

pub use escalation::{EscalationAgent, EscalationResponse, RecommendationOutcome};
pub use injury::InjurySupportAgent;
pub use nutrition::NutritionExpertAgent;
pub use response::{AdviceKind, AdviceResponse};

pub use agent_core::{AgentError, Result, SpecialistAgent, UserSessionContext};
pub use agent_runtime::{ApiConfig, ClientProvider, Settings};

/// All three specialists built over one shared client
#[derive(Debug)]
pub struct Specialists {
    pub escalation: EscalationAgent,
    pub injury_support: InjurySupportAgent,
    pub nutrition_expert: NutritionExpertAgent,
}

impl Specialists {
    pub fn new(clients: &ClientProvider) -> Result<Self> {
        Ok(Self {
            escalation: EscalationAgent::new(clients)?,
            injury_support: InjurySupportAgent::new(clients)?,
            nutrition_expert: NutritionExpertAgent::new(clients)?,
        })
    }
}
