//! Session Context
//!
//! The caller-owned record of user state threaded through every agent
//! call. Optional fields distinguish "never set" (`None`) from "set but
//! empty" (`Some(vec![])`); handoff hooks fill absent fields through the
//! explicit `ensure_*` initializers and never overwrite present values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the handoff log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandoffEntry {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Mutable per-interaction user state
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserSessionContext {
    /// Unique identifier
    #[serde(default)]
    pub id: SessionId,

    /// Stated health goal
    #[serde(default)]
    pub goal: Option<String>,

    /// Self-reported fitness level ("beginner", "intermediate", ...)
    #[serde(default)]
    pub fitness_level: Option<String>,

    #[serde(default)]
    pub injuries: Option<Vec<String>>,

    #[serde(default)]
    pub dietary_preferences: Option<Vec<String>>,

    #[serde(default)]
    pub allergies: Option<Vec<String>>,

    #[serde(default)]
    handoff_log: Vec<HandoffEntry>,
}

impl UserSessionContext {
    /// Create an empty context with a fresh id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a stated goal
    pub fn with_goal(goal: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            ..Self::default()
        }
    }

    /// Record a handoff transition
    pub fn log_handoff(&mut self, message: impl Into<String>) {
        self.handoff_log.push(HandoffEntry {
            message: message.into(),
            at: Utc::now(),
        });
    }

    /// Handoff transitions in the order they happened
    pub fn handoff_log(&self) -> &[HandoffEntry] {
        &self.handoff_log
    }

    /// Set `injuries` to an empty list if absent. Returns `true` if it changed.
    pub fn ensure_injuries(&mut self) -> bool {
        init_if_absent(&mut self.injuries, Vec::new)
    }

    /// Set `fitness_level` to `default` if absent. Returns `true` if it changed.
    pub fn ensure_fitness_level(&mut self, default: &str) -> bool {
        init_if_absent(&mut self.fitness_level, || default.to_string())
    }

    /// Set `dietary_preferences` to an empty list if absent.
    pub fn ensure_dietary_preferences(&mut self) -> bool {
        init_if_absent(&mut self.dietary_preferences, Vec::new)
    }

    /// Set `allergies` to an empty list if absent.
    pub fn ensure_allergies(&mut self) -> bool {
        init_if_absent(&mut self.allergies, Vec::new)
    }

    /// Goal, or `None` when absent or blank
    pub fn goal_text(&self) -> Option<&str> {
        non_blank(self.goal.as_deref())
    }

    /// Fitness level, or `None` when absent or blank
    pub fn fitness_level_text(&self) -> Option<&str> {
        non_blank(self.fitness_level.as_deref())
    }
}

fn init_if_absent<T>(slot: &mut Option<T>, default: impl FnOnce() -> T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(default());
    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = UserSessionContext::with_goal("Run a 10k");
        assert_eq!(ctx.goal_text(), Some("Run a 10k"));
        assert!(ctx.injuries.is_none());
        assert!(ctx.handoff_log().is_empty());
    }

    #[test]
    fn test_ensure_fills_absent_fields() {
        let mut ctx = UserSessionContext::new();
        assert!(ctx.ensure_injuries());
        assert!(ctx.ensure_fitness_level("beginner"));
        assert_eq!(ctx.injuries, Some(vec![]));
        assert_eq!(ctx.fitness_level.as_deref(), Some("beginner"));
    }

    #[test]
    fn test_ensure_keeps_present_fields() {
        let mut ctx = UserSessionContext {
            fitness_level: Some("advanced".into()),
            allergies: Some(vec!["peanuts".into()]),
            ..Default::default()
        };
        assert!(!ctx.ensure_fitness_level("beginner"));
        assert!(!ctx.ensure_allergies());
        assert_eq!(ctx.fitness_level.as_deref(), Some("advanced"));
        assert_eq!(ctx.allergies, Some(vec!["peanuts".to_string()]));
    }

    #[test]
    fn test_blank_goal_is_unspecified() {
        let ctx = UserSessionContext::with_goal("   ");
        assert_eq!(ctx.goal_text(), None);
    }

    #[test]
    fn test_log_handoff_appends() {
        let mut ctx = UserSessionContext::new();
        ctx.log_handoff("first");
        ctx.log_handoff("second");
        let messages: Vec<_> = ctx.handoff_log().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn test_deserialize_partial_context() {
        let ctx: UserSessionContext =
            serde_json::from_str(r#"{"goal":"Lose weight","allergies":[]}"#).unwrap();
        assert_eq!(ctx.goal.as_deref(), Some("Lose weight"));
        assert_eq!(ctx.allergies, Some(vec![]));
        assert!(ctx.dietary_preferences.is_none());
    }
}
