use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::provider::truncate_body;

use super::{AiError, SuggestionBackend};

pub const NAME: &str = "ollama";
pub const DEFAULT_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma:7b";

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Local inference through an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    base_url: String,
    model: String,
    timeout: Duration,
    probe_timeout: Duration,
    http: Client,
}

impl OllamaBackend {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
            probe_timeout: PROBE_TIMEOUT,
            http: Client::new(),
        }
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl SuggestionBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        match self.http.get(&url).timeout(self.probe_timeout).send().await {
            Ok(res) => res.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, url = %url, "Ollama liveness probe failed");
                false
            }
        }
    }

    async fn try_suggest(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: 0.7, top_p: 0.9, num_predict: 150 },
        };

        tracing::debug!(model = %self.model, "calling Ollama");

        let res = self
            .http
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AiError::from_reqwest(NAME, e, self.timeout))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| AiError::from_reqwest(NAME, e, self.timeout))?;

        if !status.is_success() {
            return Err(AiError::Status { backend: NAME, status: status.as_u16(), body: truncate_body(&text) });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::Malformed { backend: NAME, message: e.to_string() })?;

        Ok(parsed.response)
    }
}
