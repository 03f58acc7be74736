use serde::{Deserialize, Serialize};

use crate::{ai::AiMode, locale::Language, period::Season};

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    /// Language for the provider's condition description.
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Name as reported by the provider, or the queried name when it has none.
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
}

/// Everything needed to produce a clothing suggestion.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub time_remark: String,
    /// Localized time-of-day label, e.g. "Evening".
    pub time_label: String,
    pub season: Season,
    /// Set only when the city matches a known region.
    pub regional_hint: Option<String>,
    pub language: Language,
    pub ai_mode: AiMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Ai,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub text: String,
    pub source: SuggestionSource,
    pub succeeded: bool,
    pub error_reason: Option<String>,
}

impl SuggestionResult {
    pub fn from_ai(text: String) -> Self {
        Self { text, source: SuggestionSource::Ai, succeeded: true, error_reason: None }
    }

    /// Rule-based text, optionally remembering why AI was not used.
    pub fn from_rules(text: String, error_reason: Option<String>) -> Self {
        Self { text, source: SuggestionSource::RuleBased, succeeded: true, error_reason }
    }

    pub fn ai_failure(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            source: SuggestionSource::Ai,
            succeeded: false,
            error_reason: Some(reason.into()),
        }
    }
}
