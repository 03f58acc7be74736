//! Regional advice keyed by well-known city names.

use crate::{
    classifier::TemperatureBand,
    locale::{Language, catalog},
};

struct RegionalHint {
    /// Lowercase names and spellings matched as substrings of the city.
    aliases: &'static [&'static str],
    ja: &'static str,
    zh: &'static str,
    en: &'static str,
}

impl RegionalHint {
    fn text(&self, language: Language) -> &'static str {
        match language {
            Language::Ja => self.ja,
            Language::Zh => self.zh,
            Language::En => self.en,
        }
    }
}

// Order matters: the first matching entry wins.
static KNOWN_REGIONS: &[RegionalHint] = &[
    RegionalHint {
        aliases: &["tokyo", "東京", "东京", "とうきょう"],
        ja: "東京は電車や駅の冷暖房が強めなので、脱ぎ着しやすい服装が便利です",
        zh: "东京的电车和车站空调较强，建议穿方便穿脱的衣服",
        en: "Trains and stations in Tokyo are strongly air-conditioned, wear layers you can take off",
    },
    RegionalHint {
        aliases: &["osaka", "大阪", "おおさか"],
        ja: "大阪の夏は湿度が高いので、速乾性のある素材がおすすめです",
        zh: "大阪夏季湿度高，建议选择速干面料",
        en: "Osaka summers are very humid, quick-drying fabrics help",
    },
    RegionalHint {
        aliases: &["sapporo", "札幌", "さっぽろ"],
        ja: "札幌は雪や路面凍結が多いので、滑りにくい靴を選びましょう",
        zh: "札幌常有降雪和路面结冰，请穿防滑鞋",
        en: "Snow and icy streets are common in Sapporo, wear shoes with good grip",
    },
    RegionalHint {
        aliases: &["okinawa", "沖縄", "冲绳", "那覇", "那霸"],
        ja: "沖縄は一年中紫外線が強いので、サングラスと日焼け止めは必須です",
        zh: "冲绳全年紫外线强烈，墨镜和防晒霜必不可少",
        en: "UV is strong in Okinawa all year, sunglasses and sunscreen are a must",
    },
    RegionalHint {
        aliases: &["beijing", "peking", "北京"],
        ja: "北京は乾燥して風が強いので、ウインドブレーカーとリップクリームを",
        zh: "北京气候干燥多风，建议带上防风外套和润唇膏",
        en: "Beijing is dry and windy, bring a windbreaker and lip balm",
    },
    RegionalHint {
        aliases: &["shanghai", "上海"],
        ja: "上海はにわか雨が多いので、折りたたみ傘を持ち歩きましょう",
        zh: "上海阵雨较多，随身携带折叠伞",
        en: "Showers are frequent in Shanghai, keep a compact umbrella with you",
    },
    RegionalHint {
        aliases: &["london", "ロンドン", "伦敦"],
        ja: "ロンドンは天気が変わりやすいので、防水ジャケットが安心です",
        zh: "伦敦天气多变，防水外套是稳妥之选",
        en: "London weather changes quickly, a waterproof jacket is a safe choice",
    },
    RegionalHint {
        aliases: &["new york", "nyc", "ニューヨーク", "纽约"],
        ja: "ニューヨークはビル風で体感温度が下がるので、防風性のある上着を",
        zh: "纽约高楼间风大，体感更冷，建议加一件防风外套",
        en: "Wind between New York's towers feels colder, add a windproof layer",
    },
];

/// Hint for a known city, if `city` contains one of the known aliases.
pub fn known_hint(city: &str, language: Language) -> Option<&'static str> {
    let lower = city.to_lowercase();

    KNOWN_REGIONS
        .iter()
        .find(|region| region.aliases.iter().any(|alias| lower.contains(alias)))
        .map(|region| region.text(language))
}

/// Generic advice by temperature, used for unknown cities.
pub fn generic_tip(temperature_c: f64, language: Language) -> &'static str {
    let tips = &catalog(language).generic_tips;

    match TemperatureBand::from_celsius(temperature_c) {
        TemperatureBand::Hot => tips.hot,
        TemperatureBand::VeryCold | TemperatureBand::Cold => tips.cold,
        _ => tips.moderate,
    }
}

/// Known-city hint, or the temperature-based generic tip.
pub fn regional_advice(city: &str, temperature_c: f64, language: Language) -> &'static str {
    known_hint(city, language).unwrap_or_else(|| generic_tip(temperature_c, language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitive_substring() {
        let hint = known_hint("Tokyo-to, JP", Language::En).expect("tokyo is known");
        assert!(hint.contains("Tokyo"));

        assert_eq!(known_hint("LONDON", Language::Ja), known_hint("london", Language::Ja));
        assert!(known_hint("New York City", Language::Zh).is_some());
    }

    #[test]
    fn matches_cjk_spellings() {
        assert_eq!(known_hint("東京都", Language::Ja), known_hint("Tokyo", Language::Ja));
        assert_eq!(known_hint("北京市", Language::En), known_hint("Beijing", Language::En));
    }

    #[test]
    fn unknown_city_uses_generic_tip_by_temperature() {
        let tips = &catalog(Language::En).generic_tips;

        assert_eq!(regional_advice("Reykjavik", 30.0, Language::En), tips.hot);
        assert_eq!(regional_advice("Reykjavik", 25.0, Language::En), tips.hot);
        assert_eq!(regional_advice("Reykjavik", 9.9, Language::En), tips.cold);
        assert_eq!(regional_advice("Reykjavik", -10.0, Language::En), tips.cold);
        assert_eq!(regional_advice("Reykjavik", 10.0, Language::En), tips.moderate);
        assert_eq!(regional_advice("Reykjavik", 24.0, Language::En), tips.moderate);
    }

    #[test]
    fn known_city_wins_over_generic_tip() {
        let advice = regional_advice("Osaka", 35.0, Language::En);
        assert!(advice.contains("Osaka"));
    }
}
