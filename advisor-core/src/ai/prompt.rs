use crate::{
    locale::{Language, catalog},
    model::SuggestionRequest,
    report::format_temperature,
};

/// Localized instruction asking for a one-sentence clothing recommendation.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let season = catalog(request.language).season_names.get(request.season);
    let temperature = format_temperature(request.temperature_c);
    let city = &request.city;
    let condition = &request.condition;
    let time = &request.time_label;
    let remark = &request.time_remark;

    let mut prompt = match request.language {
        Language::En => format!(
            "You are a professional clothing advisor. Based on the weather information below, \
             provide a concise one-sentence clothing recommendation in English:\n\n\
             City: {city}\n\
             Temperature: {temperature}\n\
             Weather: {condition}\n\
             Time of Day: {time} ({remark})\n\
             Season: {season}\n"
        ),
        Language::Zh => format!(
            "你是一位专业的穿衣顾问。请根据以下天气信息，用中文提供一句简洁的穿衣建议：\n\n\
             城市：{city}\n\
             气温：{temperature}\n\
             天气：{condition}\n\
             时间段：{time}（{remark}）\n\
             季节：{season}\n"
        ),
        Language::Ja => format!(
            "あなたは服装の専門アドバイザーです。以下の天気情報に基づいて、日本語で1文の実用的な服装提案をしてください：\n\n\
             都市：{city}\n\
             気温：{temperature}\n\
             天気：{condition}\n\
             時間帯：{time}（{remark}）\n\
             季節：{season}\n"
        ),
    };

    if let Some(hint) = request.regional_hint.as_deref().filter(|h| !h.trim().is_empty()) {
        let label = match request.language {
            Language::En => "Local note",
            Language::Zh => "地区提示",
            Language::Ja => "地域情報",
        };
        prompt.push_str(&format!("{label}: {hint}\n"));
    }

    let closing = match request.language {
        Language::En => {
            "\nPlease provide practical, specific clothing advice considering the temperature, weather conditions, and time of day."
        }
        Language::Zh => "\n请提供实用、具体的穿衣建议，考虑气温、天气状况和时间段。",
        Language::Ja => "\n気温、天気状況、時間帯を考慮した具体的で実用的な服装アドバイスをお願いします。",
    };
    prompt.push_str(closing);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ai::tests::request, ai::AiMode};

    #[test]
    fn embeds_weather_facts_and_season() {
        let prompt = build_prompt(&request(AiMode::Auto));

        assert!(prompt.contains("City: Tokyo"));
        assert!(prompt.contains("Temperature: 3.0℃"));
        assert!(prompt.contains("Weather: light rain"));
        assert!(prompt.contains("Evening (Evening temperatures expected to drop)"));
        assert!(prompt.contains("Season: Winter"));
        assert!(!prompt.contains("Local note"));
    }

    #[test]
    fn includes_regional_hint_when_known() {
        let mut req = request(AiMode::Auto);
        req.regional_hint = Some("Bring an umbrella".to_string());

        assert!(build_prompt(&req).contains("Local note: Bring an umbrella"));
    }

    #[test]
    fn localized_for_japanese() {
        let mut req = request(AiMode::Auto);
        req.language = Language::Ja;

        let prompt = build_prompt(&req);
        assert!(prompt.contains("都市：Tokyo"));
        assert!(prompt.contains("季節：冬"));
    }
}
