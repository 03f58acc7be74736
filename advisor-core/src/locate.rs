//! Best-effort city detection and name normalization.

use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_CITY: &str = "Tokyo";

const LOOKUP_URL: &str = "http://ipapi.co/city/";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Guesses the current city from the public IP address.
#[derive(Debug, Clone)]
pub struct CityResolver {
    url: String,
    timeout: Duration,
    http: Client,
}

impl Default for CityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CityResolver {
    pub fn new() -> Self {
        Self { url: LOOKUP_URL.to_string(), timeout: LOOKUP_TIMEOUT, http: Client::new() }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Never fails: any error or an empty answer yields [`DEFAULT_CITY`].
    pub async fn resolve(&self) -> String {
        match self.lookup().await {
            Ok(city) if !city.is_empty() => {
                tracing::debug!(city = %city, "resolved city from IP");
                city
            }
            Ok(_) => {
                tracing::warn!("IP lookup returned no city, using {DEFAULT_CITY}");
                DEFAULT_CITY.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "IP lookup failed, using {DEFAULT_CITY}");
                DEFAULT_CITY.to_string()
            }
        }
    }

    async fn lookup(&self) -> reqwest::Result<String> {
        let res = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.text().await?.trim().to_string())
    }
}

/// Map well-known local spellings to the names weather services expect.
pub fn normalize_city(city: &str) -> String {
    let trimmed = city.trim();

    let mapped = match trimmed {
        "东京" | "東京" | "とうきょう" => "Tokyo",
        "北京" => "Beijing",
        "上海" => "Shanghai",
        "大阪" | "おおさか" => "Osaka",
        "纽约" => "New York",
        "伦敦" => "London",
        other => other,
    };

    mapped.to_string()
}
