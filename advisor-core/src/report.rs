//! Localized text report printed at the end of a run.

use crate::locale::{Language, catalog};

const SEPARATOR: &str = "========================================";

/// Values shown in the report. Empty optional strings omit their line.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub city: &'a str,
    pub temperature_c: f64,
    pub condition: &'a str,
    pub suggestion: &'a str,
    pub time_remark: &'a str,
    pub language: Language,
    pub seasonal_tip: &'a str,
    pub regional_advice: &'a str,
    pub comfort_label: Option<&'a str>,
}

/// The value exactly as observed; whole degrees keep one decimal place.
pub fn format_temperature(temperature_c: f64) -> String {
    if temperature_c.fract() == 0.0 {
        format!("{temperature_c:.1}℃")
    } else {
        format!("{temperature_c}℃")
    }
}

pub fn assemble(report: &Report<'_>) -> String {
    let labels = &catalog(report.language).labels;
    let mut lines = vec![
        SEPARATOR.to_string(),
        format!("🌤️  {}{}{}", labels.title_prefix, report.city, labels.title_suffix),
        SEPARATOR.to_string(),
        format!("🌡️  {}: {}", labels.temperature, format_temperature(report.temperature_c)),
    ];

    if let Some(comfort) = report.comfort_label.filter(|c| !c.trim().is_empty()) {
        lines.push(format!("🧭 {}: {comfort}", labels.comfort));
    }
    lines.extend(labelled("☁️ ", labels.condition, report.condition));

    lines.push(String::new());
    lines.extend(labelled("💡", labels.suggestion, report.suggestion));
    if !report.time_remark.trim().is_empty() {
        lines.push(format!("⏰ {}", report.time_remark));
    }
    lines.extend(labelled("🍂", labels.season, report.seasonal_tip));
    lines.extend(labelled("📍", labels.regional, report.regional_advice));

    lines.push(String::new());
    lines.push(labels.closing.to_string());
    lines.push(SEPARATOR.to_string());

    lines.join("\n")
}

fn labelled(icon: &str, label: &str, value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| format!("{icon} {label}: {value}"))
}
