//! Escalation Response
//!
//! The caller-facing shape of an escalation: the recommendation re-keyed
//! into coach matching and session planning sections.

use agent_core::Result;
use serde::{Deserialize, Serialize};

use super::recommendation::{Recommendation, RecommendationOutcome};

pub const ESCALATED: &str = "escalated";
pub const ESCALATION_MESSAGE: &str = "I'm connecting you with a human coach.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Model,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationResponse {
    pub status: String,
    pub message: String,
    pub escalation_details: EscalationDetails,
    pub coach_matching: CoachMatching,
    pub session_plan: SessionPlan,
    pub preparation: Vec<String>,
    pub success_metrics: Vec<String>,
    pub source: RecommendationSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDetails {
    pub reason: String,
    pub priority: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachMatching {
    pub required_specialties: Vec<String>,
    pub experience_level: String,
    pub certifications: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub format: String,
    pub duration_minutes: i64,
    pub frequency: String,
}

impl EscalationResponse {
    /// Re-shape a recommendation. Fails only if the duration is not a whole number.
    pub fn from_outcome(outcome: RecommendationOutcome) -> Result<Self> {
        let source = if outcome.is_fallback() {
            RecommendationSource::Fallback
        } else {
            RecommendationSource::Model
        };
        let recommendation = match outcome {
            RecommendationOutcome::Model(r) | RecommendationOutcome::Fallback { recommendation: r, .. } => r,
        };
        Self::from_recommendation(recommendation, source)
    }

    fn from_recommendation(rec: Recommendation, source: RecommendationSource) -> Result<Self> {
        let duration_minutes = rec.session_recommendations.duration_minutes()?;

        Ok(Self {
            status: ESCALATED.into(),
            message: ESCALATION_MESSAGE.into(),
            escalation_details: EscalationDetails {
                reason: rec.escalation_reason,
                priority: rec.priority_level,
            },
            coach_matching: CoachMatching {
                required_specialties: rec.coach_requirements.specialties,
                experience_level: rec.coach_requirements.experience_level,
                certifications: rec.coach_requirements.certifications,
            },
            session_plan: SessionPlan {
                format: rec.session_recommendations.format,
                duration_minutes,
                frequency: rec.session_recommendations.frequency,
            },
            preparation: rec.preparation_checklist,
            success_metrics: rec.success_metrics,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_shape() {
        let outcome = RecommendationOutcome::Fallback {
            recommendation: Recommendation::fallback(),
            error: "expected value at line 1 column 1".into(),
        };
        let response = EscalationResponse::from_outcome(outcome).unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "escalated",
                "message": "I'm connecting you with a human coach.",
                "escalation_details": {
                    "reason": "User requested human coach assistance",
                    "priority": "medium"
                },
                "coach_matching": {
                    "required_specialties": ["General fitness", "Nutrition"],
                    "experience_level": "intermediate",
                    "certifications": ["Certified Personal Trainer"]
                },
                "session_plan": {
                    "format": "video",
                    "duration_minutes": 30,
                    "frequency": "1 per week"
                },
                "preparation": ["Recent progress data", "Specific questions"],
                "success_metrics": ["Goal achievement", "User satisfaction"],
                "source": "fallback"
            })
        );
    }

    #[test]
    fn test_bad_duration_fails() {
        let mut rec = Recommendation::fallback();
        rec.session_recommendations.duration = json!("half an hour");
        let err = EscalationResponse::from_outcome(RecommendationOutcome::Model(rec)).unwrap_err();
        assert!(err.to_string().contains("session_recommendations.duration"));
    }
}
