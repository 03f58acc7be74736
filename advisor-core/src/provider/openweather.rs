use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    model::{WeatherObservation, WeatherRequest},
    provider::{REQUEST_TIMEOUT, truncate_body},
};

use super::WeatherProvider;

const API_BASE: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: API_BASE.to_string(), timeout: REQUEST_TIMEOUT, http: Client::new() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherObservation> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        tracing::debug!(city = %request.city, "requesting OpenWeather current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", request.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", request.language.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        let condition = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let city = if parsed.name.trim().is_empty() { request.city.clone() } else { parsed.name };

        Ok(WeatherObservation {
            city,
            temperature_c: parsed.main.temp,
            condition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use serde_json::json;
    use std::time::Instant;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> WeatherRequest {
        WeatherRequest { city: "Tokyo".to_string(), language: Language::Ja }
    }

    #[tokio::test]
    async fn parses_current_weather() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Tokyo"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "ja"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Tokyo",
                "dt": 1_700_000_000,
                "main": { "temp": 12.4, "feels_like": 11.0, "humidity": 60 },
                "weather": [{ "description": "小雨" }],
                "wind": { "speed": 3.1 }
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("KEY".to_string()).with_base_url(&server.uri());
        let observation = provider.get_weather(&request()).await.expect("observation");

        assert_eq!(observation.city, "Tokyo");
        assert_eq!(observation.temperature_c, 12.4);
        assert_eq!(observation.condition, "小雨");
    }

    #[tokio::test]
    async fn missing_description_is_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Tokyo",
                "main": { "temp": 20.0 },
                "weather": []
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("KEY".to_string()).with_base_url(&server.uri());
        let observation = provider.get_weather(&request()).await.expect("observation");
        assert_eq!(observation.condition, "Unknown");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"Invalid API key\"}"))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("BAD".to_string()).with_base_url(&server.uri());
        let err = provider.get_weather(&request()).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn canonical_city_name_is_returned() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Tokyo",
                "main": { "temp": 9.5 },
                "weather": [{ "description": "clear sky" }]
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("KEY".to_string()).with_base_url(&server.uri());
        let request = WeatherRequest { city: "tokyo".to_string(), language: Language::En };
        let observation = provider.get_weather(&request).await.expect("observation");
        assert_eq!(observation.city, "Tokyo");
    }

    #[tokio::test]
    async fn missing_name_keeps_queried_city() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 9.5 },
                "weather": [{ "description": "clear sky" }]
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("KEY".to_string()).with_base_url(&server.uri());
        let observation = provider.get_weather(&request()).await.expect("observation");
        assert_eq!(observation.city, "Tokyo");
    }

    #[tokio::test]
    async fn stalled_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "name": "Tokyo", "main": { "temp": 1.0 }, "weather": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::new("KEY".to_string())
            .with_base_url(&server.uri())
            .with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let err = provider.get_weather(&request()).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(err.to_string().contains("Failed to send request to OpenWeather"));
    }
}
