//! Advice Responses
//!
//! Shape returned by the injury support and nutrition expert specialists:
//! the raw model text plus a constant type tag.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    InjurySupport,
    NutritionAdvice,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceKind::InjurySupport => "injury_support",
            AdviceKind::NutritionAdvice => "nutrition_advice",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    /// Completion text, unmodified
    pub message: String,

    #[serde(rename = "type")]
    pub kind: AdviceKind,
}

impl AdviceResponse {
    pub fn new(message: impl Into<String>, kind: AdviceKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}
