//! Suggestion resolution: AI first, rule-based fallback.

use chrono::NaiveDateTime;

use crate::{
    ai::{AiMode, AiOrchestrator},
    classifier::{TemperatureBand, classify},
    locale::{Language, catalog},
    model::{SuggestionRequest, SuggestionResult, WeatherObservation},
    period::{Season, TimeOfDay},
    regional,
    report::Report,
};

/// Build the request from an observation taken at local time `now`.
///
/// The report uses the provider's name for the city, e.g. "Tokyo" for a "tokyo" query.
pub fn build_request(
    observation: &WeatherObservation,
    language: Language,
    ai_mode: AiMode,
    now: NaiveDateTime,
) -> SuggestionRequest {
    let texts = catalog(language);
    let time = TimeOfDay::at(now);
    let city = observation.city.as_str();

    SuggestionRequest {
        city: city.to_string(),
        temperature_c: observation.temperature_c,
        condition: observation.condition.clone(),
        time_remark: texts.time_remarks.get(time).to_string(),
        time_label: texts.time_labels.get(time).to_string(),
        season: Season::at(now),
        regional_hint: regional::known_hint(city, language).map(str::to_string),
        language,
        ai_mode,
    }
}

/// Resolve the final suggestion for `request`.
///
/// With AI off the rules answer directly. An AI failure falls back to the rules
/// (keeping the reason) unless `fallback_enabled` is false, in which case the
/// failure is returned as is.
pub async fn resolve(
    request: &SuggestionRequest,
    orchestrator: &AiOrchestrator,
    fallback_enabled: bool,
) -> SuggestionResult {
    let rules = || classify(request.temperature_c, &request.condition, request.language);

    if request.ai_mode == AiMode::Off {
        return SuggestionResult::from_rules(rules(), None);
    }

    let result = orchestrator.suggest(request).await;
    if result.succeeded {
        return result;
    }

    if fallback_enabled {
        tracing::debug!(reason = ?result.error_reason, "falling back to rule-based suggestion");
        SuggestionResult::from_rules(rules(), result.error_reason)
    } else {
        result
    }
}

/// Report for a resolved suggestion.
pub fn report_for<'a>(
    request: &'a SuggestionRequest,
    suggestion: &'a SuggestionResult,
) -> Report<'a> {
    let texts = catalog(request.language);

    Report {
        city: &request.city,
        temperature_c: request.temperature_c,
        condition: &request.condition,
        suggestion: &suggestion.text,
        time_remark: &request.time_remark,
        language: request.language,
        seasonal_tip: texts.season_tips.get(request.season),
        regional_advice: regional::regional_advice(&request.city, request.temperature_c, request.language),
        comfort_label: Some(texts.comfort.get(TemperatureBand::from_celsius(request.temperature_c))),
    }
}
