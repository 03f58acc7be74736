//! Rule-based clothing suggestions.

use crate::locale::{Language, catalog};

/// Temperature bands with exclusive upper bounds in °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    /// below 5
    VeryCold,
    /// 5 to below 10
    Cold,
    /// 10 to below 15
    Cool,
    /// 15 to below 20
    Mild,
    /// 20 to below 25
    Warm,
    /// 25 and above
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(temperature_c: f64) -> Self {
        if temperature_c < 5.0 {
            TemperatureBand::VeryCold
        } else if temperature_c < 10.0 {
            TemperatureBand::Cold
        } else if temperature_c < 15.0 {
            TemperatureBand::Cool
        } else if temperature_c < 20.0 {
            TemperatureBand::Mild
        } else if temperature_c < 25.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::VeryCold => "very_cold",
            TemperatureBand::Cold => "cold",
            TemperatureBand::Cool => "cool",
            TemperatureBand::Mild => "mild",
            TemperatureBand::Warm => "warm",
            TemperatureBand::Hot => "hot",
        }
    }

    pub const fn all() -> &'static [TemperatureBand] {
        &[
            TemperatureBand::VeryCold,
            TemperatureBand::Cold,
            TemperatureBand::Cool,
            TemperatureBand::Mild,
            TemperatureBand::Warm,
            TemperatureBand::Hot,
        ]
    }
}

/// True when the condition mentions rain in any supported language.
///
/// Weather providers may answer in a different language than the one used for
/// output, so every catalog's keywords are checked.
pub fn is_rainy(condition: &str) -> bool {
    let lower = condition.to_lowercase();

    Language::all()
        .iter()
        .flat_map(|lang| catalog(*lang).rain_keywords.iter())
        .any(|keyword| lower.contains(keyword))
}

/// Suggest clothing for a temperature and condition description.
pub fn classify(temperature_c: f64, condition: &str, language: Language) -> String {
    let texts = catalog(language);
    let band = TemperatureBand::from_celsius(temperature_c);

    let mut suggestion = texts.suggestions.get(band).to_string();

    if is_rainy(condition) {
        suggestion.push_str(texts.sentence_separator);
        suggestion.push_str(texts.rain_note);
    }

    suggestion
}
