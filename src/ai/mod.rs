//! AI assistant for report summaries and category suggestions
//!
//! The assistant is auxiliary: `summarize_report` and `suggest_categories`
//! never fail. Provider errors are logged and replaced with a fixed fallback
//! summary or an empty suggestion list. Nothing is retried.

pub mod client;
pub mod error;
pub mod prompts;

use tracing::warn;

use crate::config::AiSettings;
use crate::models::Category;

pub use client::AnthropicAssistant;
pub use error::AiError;

/// Shown in place of a summary when the assistant fails
pub const SUMMARY_FALLBACK: &str = "Sorry, I was unable to generate a summary for this report.";

/// A text-generation provider
pub trait Assistant {
    /// Summarize report data (pretty JSON of the report rows)
    fn summarize(&self, report_data: &str) -> Result<String, AiError>;

    /// Free-form category names for a transaction
    fn suggest_categories(&self, description: &str, vendor: &str) -> Result<Vec<String>, AiError>;
}

/// Stand-in used when AI is switched off or has no key
pub struct DisabledAssistant {
    reason: String,
}

impl DisabledAssistant {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Assistant for DisabledAssistant {
    fn summarize(&self, _report_data: &str) -> Result<String, AiError> {
        Err(AiError::Disabled(self.reason.clone()))
    }

    fn suggest_categories(&self, _description: &str, _vendor: &str) -> Result<Vec<String>, AiError> {
        Err(AiError::Disabled(self.reason.clone()))
    }
}

/// The configured assistant, or a disabled one explaining why not
pub fn assistant_from_settings(settings: &AiSettings) -> Box<dyn Assistant> {
    if !settings.enabled {
        return Box::new(DisabledAssistant::new("AI features are turned off in config.json"));
    }
    let Some(api_key) = settings.api_key() else {
        return Box::new(DisabledAssistant::new(format!(
            "{} is not set",
            settings.api_key_env
        )));
    };
    match AnthropicAssistant::new(settings, &api_key) {
        Ok(assistant) => Box::new(assistant),
        Err(e) => Box::new(DisabledAssistant::new(e.to_string())),
    }
}

/// Summary text for a report, or the fallback message
pub fn summarize_report(assistant: &dyn Assistant, report_data: &str) -> String {
    match assistant.summarize(report_data) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(error = %e, "report summary unavailable");
            SUMMARY_FALLBACK.to_string()
        }
    }
}

/// Suggested names mapped onto existing categories, in suggestion order
///
/// Names match case-insensitively; suggestions with no matching category
/// are dropped.
pub fn suggest_categories(
    assistant: &dyn Assistant,
    description: &str,
    vendor: &str,
    categories: &[Category],
) -> Vec<Category> {
    let names = match assistant.suggest_categories(description, vendor) {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, "category suggestions unavailable");
            return Vec::new();
        }
    };

    let mut matched: Vec<Category> = Vec::new();
    for name in names {
        if let Some(category) = categories.iter().find(|c| c.matches_name(&name)) {
            if !matched.iter().any(|m| m.id == category.id) {
                matched.push(category.clone());
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubAssistant {
        summary: Result<String, ()>,
        suggestions: Result<Vec<String>, ()>,
    }

    impl Assistant for StubAssistant {
        fn summarize(&self, report_data: &str) -> Result<String, AiError> {
            self.summary
                .clone()
                .map(|s| format!("{} ({} bytes)", s, report_data.len()))
                .map_err(|_| AiError::Parse("stub failure".into()))
        }

        fn suggest_categories(&self, _d: &str, _v: &str) -> Result<Vec<String>, AiError> {
            self.suggestions
                .clone()
                .map_err(|_| AiError::Unauthorized("stub".into()))
        }
    }

    fn stub(summary: Result<&str, ()>, suggestions: Result<Vec<&str>, ()>) -> StubAssistant {
        StubAssistant {
            summary: summary.map(String::from),
            suggestions: suggestions.map(|v| v.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_summary_passes_through() {
        let assistant = stub(Ok("Spending is steady"), Ok(vec![]));
        assert_eq!(summarize_report(&assistant, "[]"), "Spending is steady (2 bytes)");
    }

    #[test]
    fn test_summary_failure_uses_fallback() {
        let assistant = stub(Err(()), Ok(vec![]));
        assert_eq!(summarize_report(&assistant, "[]"), SUMMARY_FALLBACK);
        assert_eq!(
            summarize_report(&DisabledAssistant::new("off"), "[]"),
            SUMMARY_FALLBACK
        );
    }

    #[test]
    fn test_suggestions_map_onto_existing_categories() {
        let categories = Category::defaults();
        let assistant = stub(
            Ok(""),
            Ok(vec!["food & beverage", "Meals", "TRAVEL", "Food & Beverage"]),
        );

        let suggested = suggest_categories(&assistant, "Team lunch", "Quick Eats Cafe", &categories);
        let ids: Vec<&str> = suggested.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c3"]);
    }

    #[test]
    fn test_suggestion_failure_is_empty() {
        let categories = Category::defaults();
        let assistant = stub(Ok(""), Err(()));
        assert!(suggest_categories(&assistant, "x", "y", &categories).is_empty());
    }

    #[test]
    fn test_disabled_when_turned_off() {
        let settings = AiSettings {
            enabled: false,
            ..AiSettings::default()
        };
        let assistant = assistant_from_settings(&settings);
        assert!(matches!(
            assistant.summarize("[]"),
            Err(AiError::Disabled(_))
        ));
    }
}
