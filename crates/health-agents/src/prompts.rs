//! Prompt Templates
//!
//! System prompts for each specialist and the builders that render the
//! session context into the user message.

use agent_core::UserSessionContext;

pub const NOT_SPECIFIED: &str = "Not specified";

/// System prompt for the coach-matching (escalation) call
pub const ESCALATION_SYSTEM_PROMPT: &str = r#"You are an expert in matching users with appropriate health and fitness coaches. Analyze the user's context and query to recommend the best coaching approach. The response should be a JSON object with the following structure:
{
    "escalation_reason": "detailed reason for escalation",
    "priority_level": "low/medium/high",
    "coach_requirements": {
        "specialties": ["specialty1", "specialty2"],
        "experience_level": "entry/intermediate/senior",
        "certifications": ["cert1", "cert2"]
    },
    "session_recommendations": {
        "format": "video/audio/text",
        "duration": "minutes",
        "frequency": "sessions per week/month"
    },
    "preparation_checklist": ["item1", "item2"],
    "success_metrics": ["metric1", "metric2"]
}"#;

/// System prompt for injury and rehabilitation guidance
pub const INJURY_SUPPORT_SYSTEM_PROMPT: &str = "You are a qualified physical therapy and rehabilitation expert with extensive knowledge of \
exercise modifications, injury prevention, and safe recovery practices. Always prioritize safety and injury \
prevention in your advice. Recommend consulting healthcare providers for specific medical conditions or severe \
injuries. Focus on providing safe alternatives and recovery strategies.";

/// System prompt for dietary guidance
pub const NUTRITION_EXPERT_SYSTEM_PROMPT: &str = "You are a qualified nutrition expert with extensive knowledge of dietary requirements, \
restrictions, and health conditions. Provide detailed, scientifically-backed advice while maintaining a supportive \
and educational tone. Always prioritize safety and recommend consulting healthcare providers for medical conditions.";

/// Escalation context: every field on its own line, query last
pub fn escalation_context(context: &UserSessionContext, query: &str) -> String {
    [
        format!("User Goal: {}", context.goal_text().unwrap_or(NOT_SPECIFIED)),
        format!("Fitness Level: {}", context.fitness_level_text().unwrap_or(NOT_SPECIFIED)),
        format!("Injuries: {}", join_or_none(context.injuries.as_deref())),
        format!(
            "Dietary Preferences: {}",
            join_or_none(context.dietary_preferences.as_deref())
        ),
        format!("Query: {}", query),
    ]
    .join("\n")
}

/// Injury context: goal, then injuries and fitness level when present
pub fn injury_context(context: &UserSessionContext) -> String {
    let mut out = goal_line(context);
    if let Some(injuries) = &context.injuries {
        out.push_str(&format!("\nReported injuries: {}", injuries.join(", ")));
    }
    if let Some(level) = &context.fitness_level {
        out.push_str(&format!("\nFitness level: {}", level));
    }
    out
}

/// Nutrition context: goal, then dietary preferences and allergies when present
pub fn nutrition_context(context: &UserSessionContext) -> String {
    let mut out = goal_line(context);
    if let Some(preferences) = &context.dietary_preferences {
        out.push_str(&format!("\nDietary preferences: {}", preferences.join(", ")));
    }
    if let Some(allergies) = &context.allergies {
        out.push_str(&format!("\nAllergies: {}", allergies.join(", ")));
    }
    out
}

/// User message framing shared by the advice specialists
pub fn advice_message(context: &str, query: &str) -> String {
    format!("Context: {}\n\nQuery: {}", context, query)
}

fn goal_line(context: &UserSessionContext) -> String {
    format!(
        "User's health goal: {}",
        context.goal_text().unwrap_or(NOT_SPECIFIED)
    )
}

fn join_or_none(items: Option<&[String]>) -> String {
    match items {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => "None".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_context() -> UserSessionContext {
        {
            let mut ctx = UserSessionContext::default();
            ctx.goal = Some("Build strength".into());
            ctx.fitness_level = Some("intermediate".into());
            ctx.injuries = Some(vec!["knee strain".into(), "sore wrist".into()]);
            ctx.dietary_preferences = Some(vec!["vegetarian".into()]);
            ctx.allergies = Some(vec!["peanuts".into(), "shellfish".into()]);
            ctx
        }
    }

    #[test]
    fn test_escalation_context_full() {
        let text = escalation_context(&full_context(), "I want a real coach");
        assert_eq!(
            text,
            "User Goal: Build strength\n\
             Fitness Level: intermediate\n\
             Injuries: knee strain, sore wrist\n\
             Dietary Preferences: vegetarian\n\
             Query: I want a real coach"
        );
    }

    #[test]
    fn test_escalation_context_empty() {
        let ctx = {
            let mut ctx = UserSessionContext::default();
            ctx.injuries = Some(vec![]);
            ctx
        };
        let text = escalation_context(&ctx, "help");
        assert!(text.contains("User Goal: Not specified"));
        assert!(text.contains("Fitness Level: Not specified"));
        assert!(text.contains("Injuries: None"));
        assert!(text.contains("Dietary Preferences: None"));
    }

    #[test]
    fn test_injury_context_skips_absent_fields() {
        let ctx = UserSessionContext::with_goal("Run a marathon");
        assert_eq!(injury_context(&ctx), "User's health goal: Run a marathon");
    }

    #[test]
    fn test_injury_context_includes_present_fields() {
        assert_eq!(
            injury_context(&full_context()),
            "User's health goal: Build strength\n\
             Reported injuries: knee strain, sore wrist\n\
             Fitness level: intermediate"
        );
    }

    #[test]
    fn test_injury_context_empty_list_still_listed() {
        let ctx = {
            let mut ctx = UserSessionContext::default();
            ctx.injuries = Some(vec![]);
            ctx
        };
        assert_eq!(
            injury_context(&ctx),
            "User's health goal: Not specified\nReported injuries: "
        );
    }

    #[test]
    fn test_nutrition_context() {
        assert_eq!(
            nutrition_context(&full_context()),
            "User's health goal: Build strength\n\
             Dietary preferences: vegetarian\n\
             Allergies: peanuts, shellfish"
        );
    }

    #[test]
    fn test_advice_message() {
        assert_eq!(advice_message("ctx", "q?"), "Context: ctx\n\nQuery: q?");
    }
}
