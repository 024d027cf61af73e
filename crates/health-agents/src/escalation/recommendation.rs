//! Coach-Matching Recommendation
//!
//! Typed view of the JSON object the escalation prompt asks the model for.
//! Extraction is strict: a missing key or a value of the wrong shape is an
//! error naming the key path.

use agent_core::{AgentError, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub escalation_reason: String,
    pub priority_level: String,
    pub coach_requirements: CoachRequirements,
    pub session_recommendations: SessionRecommendations,
    pub preparation_checklist: Vec<String>,
    pub success_metrics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoachRequirements {
    pub specialties: Vec<String>,
    pub experience_level: String,
    pub certifications: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionRecommendations {
    pub format: String,

    /// Minutes, as the model wrote it (usually a numeric string)
    pub duration: Value,

    pub frequency: String,
}

impl SessionRecommendations {
    /// Session length in whole minutes
    pub fn duration_minutes(&self) -> Result<i64> {
        coerce_minutes(&self.duration)
    }
}

/// Where a recommendation came from
#[derive(Clone, Debug, PartialEq)]
pub enum RecommendationOutcome {
    /// The model replied with a complete JSON recommendation
    Model(Recommendation),

    /// The reply was not valid JSON; the fixed default was used instead
    Fallback {
        recommendation: Recommendation,
        error: String,
    },
}

impl RecommendationOutcome {
    /// Interpret a completion. Only a JSON syntax error falls back; valid JSON
    /// with missing or mistyped keys is an error.
    pub fn from_completion(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Ok(Self::Model(Recommendation::from_value(&value)?)),
            Err(e) => Ok(Self::Fallback {
                recommendation: Recommendation::fallback(),
                error: e.to_string(),
            }),
        }
    }

    pub fn recommendation(&self) -> &Recommendation {
        match self {
            Self::Model(r) | Self::Fallback { recommendation: r, .. } => r,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl Recommendation {
    /// Default used when the model reply cannot be parsed
    pub fn fallback() -> Self {
        Self {
            escalation_reason: "User requested human coach assistance".into(),
            priority_level: "medium".into(),
            coach_requirements: CoachRequirements {
                specialties: vec!["General fitness".into(), "Nutrition".into()],
                experience_level: "intermediate".into(),
                certifications: vec!["Certified Personal Trainer".into()],
            },
            session_recommendations: SessionRecommendations {
                format: "video".into(),
                duration: Value::String("30".into()),
                frequency: "1 per week".into(),
            },
            preparation_checklist: vec!["Recent progress data".into(), "Specific questions".into()],
            success_metrics: vec!["Goal achievement".into(), "User satisfaction".into()],
        }
    }

    /// Extract from a parsed JSON reply
    pub fn from_value(value: &Value) -> Result<Self> {
        let coach = field(value, "coach_requirements", "coach_requirements")?;
        let session = field(value, "session_recommendations", "session_recommendations")?;

        Ok(Self {
            escalation_reason: text(value, "escalation_reason", "escalation_reason")?,
            priority_level: text(value, "priority_level", "priority_level")?,
            coach_requirements: CoachRequirements {
                specialties: text_list(coach, "specialties", "coach_requirements.specialties")?,
                experience_level: text(coach, "experience_level", "coach_requirements.experience_level")?,
                certifications: text_list(coach, "certifications", "coach_requirements.certifications")?,
            },
            session_recommendations: SessionRecommendations {
                format: text(session, "format", "session_recommendations.format")?,
                duration: field(session, "duration", "session_recommendations.duration")?.clone(),
                frequency: text(session, "frequency", "session_recommendations.frequency")?,
            },
            preparation_checklist: text_list(value, "preparation_checklist", "preparation_checklist")?,
            success_metrics: text_list(value, "success_metrics", "success_metrics")?,
        })
    }
}

fn field<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    match parent {
        Value::Object(map) => map.get(key).ok_or_else(|| AgentError::MissingField(path.into())),
        other => Err(AgentError::InvalidField {
            field: parent_path(path),
            reason: format!("expected an object, got {}", kind(other)),
        }),
    }
}

fn text(parent: &Value, key: &str, path: &str) -> Result<String> {
    scalar_text(field(parent, key, path)?, path)
}

fn text_list(parent: &Value, key: &str, path: &str) -> Result<Vec<String>> {
    match field(parent, key, path)? {
        Value::Array(items) => items.iter().map(|item| scalar_text(item, path)).collect(),
        other => Err(AgentError::InvalidField {
            field: path.into(),
            reason: format!("expected a list, got {}", kind(other)),
        }),
    }
}

fn scalar_text(value: &Value, path: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AgentError::InvalidField {
            field: path.into(),
            reason: format!("expected text, got {}", kind(other)),
        }),
    }
}

/// Integers pass, floats truncate toward zero, strings parse as base-10 integers
fn coerce_minutes(value: &Value) -> Result<i64> {
    let invalid = |reason: String| AgentError::InvalidField {
        field: "session_recommendations.duration".into(),
        reason,
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                #[allow(clippy::cast_possible_truncation)]
                Some(f) if f.is_finite() && f.abs() < 9.0e18 => Ok(f.trunc() as i64),
                _ => Err(invalid(format!("{} is out of range", n))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("{:?} is not a whole number of minutes", s))),
        other => Err(invalid(format!("expected a number, got {}", kind(other)))),
    }
}

fn parent_path(path: &str) -> String {
    path.rsplit_once('.').map_or_else(|| "<root>".to_string(), |(parent, _)| parent.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
