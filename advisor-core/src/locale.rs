//! Static message catalog, one table per supported language.
//!
//! Japanese is the base language: any unknown language code resolves to it.

use std::{convert::TryFrom, fmt};

use crate::{
    classifier::TemperatureBand,
    period::{Season, TimeOfDay},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Ja,
    Zh,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::Ja, Language::Zh, Language::En]
    }

    /// Resolve a language code, falling back to the base language when unsupported.
    pub fn from_code(code: &str) -> Self {
        Self::try_from(code).unwrap_or_else(|_| {
            tracing::debug!(code, "unsupported language code, using base language");
            Language::default()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        // Accept region-qualified codes such as "en-US" or "zh_CN".
        let primary = lower.split(['-', '_']).next().unwrap_or_default();

        match primary {
            "ja" => Ok(Language::Ja),
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!("Unsupported language '{value}'. Supported languages: ja, zh, en.")),
        }
    }
}

/// One text per temperature band.
#[derive(Debug)]
pub struct BandTexts {
    pub very_cold: &'static str,
    pub cold: &'static str,
    pub cool: &'static str,
    pub mild: &'static str,
    pub warm: &'static str,
    pub hot: &'static str,
}

impl BandTexts {
    pub fn get(&self, band: TemperatureBand) -> &'static str {
        match band {
            TemperatureBand::VeryCold => self.very_cold,
            TemperatureBand::Cold => self.cold,
            TemperatureBand::Cool => self.cool,
            TemperatureBand::Mild => self.mild,
            TemperatureBand::Warm => self.warm,
            TemperatureBand::Hot => self.hot,
        }
    }
}

#[derive(Debug)]
pub struct TimeTexts {
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: &'static str,
    pub night: &'static str,
}

impl TimeTexts {
    pub fn get(&self, time: TimeOfDay) -> &'static str {
        match time {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
            TimeOfDay::Night => self.night,
        }
    }
}

#[derive(Debug)]
pub struct SeasonTexts {
    pub spring: &'static str,
    pub summer: &'static str,
    pub autumn: &'static str,
    pub winter: &'static str,
}

impl SeasonTexts {
    pub fn get(&self, season: Season) -> &'static str {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
            Season::Winter => self.winter,
        }
    }
}

/// Regional advice used when the city matches no known location.
#[derive(Debug)]
pub struct GenericTips {
    pub hot: &'static str,
    pub cold: &'static str,
    pub moderate: &'static str,
}

/// Section labels of the printed report.
#[derive(Debug)]
pub struct ReportLabels {
    /// Title is `{title_prefix}{city}{title_suffix}`.
    pub title_prefix: &'static str,
    pub title_suffix: &'static str,
    pub temperature: &'static str,
    pub comfort: &'static str,
    pub condition: &'static str,
    pub suggestion: &'static str,
    pub season: &'static str,
    pub regional: &'static str,
    pub closing: &'static str,
}

#[derive(Debug)]
pub struct Messages {
    pub weather_unavailable: &'static str,
    pub ai_unavailable: &'static str,
    pub ai_fallback: &'static str,
}

#[derive(Debug)]
pub struct Catalog {
    pub language: Language,
    pub suggestions: BandTexts,
    pub comfort: BandTexts,
    pub rain_note: &'static str,
    /// Joins the rain note onto a suggestion.
    pub sentence_separator: &'static str,
    /// Lowercase substrings marking a rainy condition description.
    pub rain_keywords: &'static [&'static str],
    pub time_remarks: TimeTexts,
    pub time_labels: TimeTexts,
    pub season_names: SeasonTexts,
    pub season_tips: SeasonTexts,
    pub generic_tips: GenericTips,
    pub labels: ReportLabels,
    pub messages: Messages,
}

/// Catalog for `language`.
pub fn catalog(language: Language) -> &'static Catalog {
    match language {
        Language::Ja => &JA,
        Language::Zh => &ZH,
        Language::En => &EN,
    }
}

static JA: Catalog = Catalog {
    language: Language::Ja,
    suggestions: BandTexts {
        very_cold: "ダウンジャケットやコート、手袋、マフラーをお忘れなく",
        cold: "ジャケットやセーターで暖かく過ごしましょう",
        cool: "薄手のジャケットや長袖シャツがおすすめです",
        mild: "長袖シャツや軽いカーディガンが快適です",
        warm: "半袖シャツや薄手の服装で十分です",
        hot: "涼しい服装と日焼け対策をお忘れなく",
    },
    comfort: BandTexts {
        very_cold: "極寒",
        cold: "寒い",
        cool: "肌寒い",
        mild: "快適",
        warm: "暖かい",
        hot: "暑い",
    },
    rain_note: "雨具をお持ちください",
    sentence_separator: "。",
    rain_keywords: &["雨"],
    time_remarks: TimeTexts {
        morning: "朝は涼しいです",
        afternoon: "日中は暖かくなります",
        evening: "夜は冷え込むでしょう",
        night: "深夜は一日で最も冷え込みます",
    },
    time_labels: TimeTexts {
        morning: "朝",
        afternoon: "昼",
        evening: "夜",
        night: "深夜",
    },
    season_names: SeasonTexts {
        spring: "春",
        summer: "夏",
        autumn: "秋",
        winter: "冬",
    },
    season_tips: SeasonTexts {
        spring: "春は朝晩と日中の寒暖差が大きいので、重ね着がおすすめです",
        summer: "夏はこまめな水分補給と日差し対策を心がけましょう",
        autumn: "秋は夕方から急に冷えるので、羽織るものがあると安心です",
        winter: "冬は首元・手先・足元をしっかり温めましょう",
    },
    generic_tips: GenericTips {
        hot: "暑い日は通気性の良い素材と帽子を選びましょう",
        cold: "寒い日は重ね着をして肌の露出を控えましょう",
        moderate: "過ごしやすい気温です。念のため羽織るものを一枚どうぞ",
    },
    labels: ReportLabels {
        title_prefix: "",
        title_suffix: "の天気情報",
        temperature: "気温",
        comfort: "体感",
        condition: "天気",
        suggestion: "服装アドバイス",
        season: "季節のヒント",
        regional: "地域のアドバイス",
        closing: "良い一日をお過ごしください！",
    },
    messages: Messages {
        weather_unavailable: "申し訳ありません。天気データを取得できませんでした。",
        ai_unavailable: "AI提案を取得できませんでした",
        ai_fallback: "AI提案を取得できなかったため、標準のアドバイスを表示します",
    },
};

static ZH: Catalog = Catalog {
    language: Language::Zh,
    suggestions: BandTexts {
        very_cold: "建议穿羽绒服或大衣，别忘了手套和围巾",
        cold: "建议穿夹克或毛衣保暖",
        cool: "建议穿轻薄外套或长袖衬衫",
        mild: "长袖衬衫或轻薄开衫比较舒适",
        warm: "短袖衬衫或薄衣服就足够了",
        hot: "穿凉爽服装，注意防晒",
    },
    comfort: BandTexts {
        very_cold: "严寒",
        cold: "寒冷",
        cool: "凉爽",
        mild: "舒适",
        warm: "温暖",
        hot: "炎热",
    },
    rain_note: "请携带雨具",
    sentence_separator: "。",
    rain_keywords: &["雨"],
    time_remarks: TimeTexts {
        morning: "早上比较凉爽",
        afternoon: "下午会比较温暖",
        evening: "晚上气温会下降",
        night: "深夜气温最低",
    },
    time_labels: TimeTexts {
        morning: "早上",
        afternoon: "下午",
        evening: "晚上",
        night: "深夜",
    },
    season_names: SeasonTexts {
        spring: "春季",
        summer: "夏季",
        autumn: "秋季",
        winter: "冬季",
    },
    season_tips: SeasonTexts {
        spring: "春季早晚温差大，建议采用叠穿方式",
        summer: "夏季注意补充水分，避免正午暴晒",
        autumn: "秋季傍晚容易降温，备一件薄外套",
        winter: "冬季注意颈部、手脚保暖",
    },
    generic_tips: GenericTips {
        hot: "天气炎热，选择透气面料并戴上帽子",
        cold: "天气寒冷，注意分层穿衣、减少皮肤外露",
        moderate: "气温适宜，可备一件薄外套以防变化",
    },
    labels: ReportLabels {
        title_prefix: "",
        title_suffix: "天气信息",
        temperature: "气温",
        comfort: "体感",
        condition: "天气",
        suggestion: "穿衣建议",
        season: "季节提示",
        regional: "地区建议",
        closing: "祝你有美好的一天！",
    },
    messages: Messages {
        weather_unavailable: "抱歉，无法获取天气数据。",
        ai_unavailable: "无法获取AI建议",
        ai_fallback: "AI建议不可用，改为显示标准建议",
    },
};

static EN: Catalog = Catalog {
    language: Language::En,
    suggestions: BandTexts {
        very_cold: "Wear a down jacket or coat, don't forget gloves and scarf",
        cold: "A jacket or sweater will keep you warm",
        cool: "A light jacket or long-sleeve shirt is recommended",
        mild: "Long-sleeve shirt or light cardigan is comfortable",
        warm: "Short-sleeve shirt or light clothing is sufficient",
        hot: "Wear cool clothing and don't forget sun protection",
    },
    comfort: BandTexts {
        very_cold: "Freezing",
        cold: "Cold",
        cool: "Cool",
        mild: "Comfortable",
        warm: "Warm",
        hot: "Hot",
    },
    rain_note: "Please bring rain gear",
    sentence_separator: ". ",
    rain_keywords: &["rain", "drizzle", "shower"],
    time_remarks: TimeTexts {
        morning: "Morning temperatures are cool",
        afternoon: "Afternoon will be warmer",
        evening: "Evening temperatures expected to drop",
        night: "Late night is the coldest part of the day",
    },
    time_labels: TimeTexts {
        morning: "Morning",
        afternoon: "Afternoon",
        evening: "Evening",
        night: "Night",
    },
    season_names: SeasonTexts {
        spring: "Spring",
        summer: "Summer",
        autumn: "Autumn",
        winter: "Winter",
    },
    season_tips: SeasonTexts {
        spring: "Spring days swing between cool mornings and warm afternoons, layers work best",
        summer: "Stay hydrated and keep out of the midday sun",
        autumn: "Autumn evenings turn chilly quickly, carry a light layer",
        winter: "Keep your neck, hands and feet warm",
    },
    generic_tips: GenericTips {
        hot: "Hot weather: choose breathable fabrics and wear a hat",
        cold: "Cold weather: dress in layers and cover exposed skin",
        moderate: "Comfortable weather: a light extra layer is handy if it changes",
    },
    labels: ReportLabels {
        title_prefix: "Weather in ",
        title_suffix: "",
        temperature: "Temperature",
        comfort: "Feels",
        condition: "Weather",
        suggestion: "Clothing Advice",
        season: "Seasonal Tip",
        regional: "Local Advice",
        closing: "Have a great day!",
    },
    messages: Messages {
        weather_unavailable: "Sorry, could not fetch weather data.",
        ai_unavailable: "AI suggestion unavailable",
        ai_fallback: "AI suggestion unavailable, showing the standard advice instead",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_code_roundtrip() {
        for lang in Language::all() {
            let parsed = Language::try_from(lang.as_str()).expect("roundtrip should succeed");
            assert_eq!(*lang, parsed);
            assert_eq!(catalog(*lang).language, *lang);
        }
    }

    #[test]
    fn region_qualified_codes_are_accepted() {
        assert_eq!(Language::from_code("en-US"), Language::En);
        assert_eq!(Language::from_code("zh_CN"), Language::Zh);
        assert_eq!(Language::from_code(" JA "), Language::Ja);
    }

    #[test]
    fn unsupported_language_falls_back_to_japanese() {
        assert_eq!(Language::from_code("fr"), Language::Ja);
        assert_eq!(Language::from_code(""), Language::Ja);

        let err = Language::try_from("fr").unwrap_err();
        assert!(err.to_string().contains("Unsupported language"));
    }

    #[test]
    fn rain_keywords_are_lowercase() {
        for lang in Language::all() {
            for keyword in catalog(*lang).rain_keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
