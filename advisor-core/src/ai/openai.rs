use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::provider::truncate_body;

use super::{AiError, SuggestionBackend};

pub const NAME: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const API_BASE: &str = "https://api.openai.com";
const SYSTEM_PROMPT: &str = "You are a helpful clothing advisor.";

/// Hosted chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    base_url: String,
    http: Client,
}

impl OpenAiBackend {
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.to_string(),
            timeout,
            base_url: API_BASE.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[async_trait]
impl SuggestionBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Selectable whenever a key is configured; no network round trip.
    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn try_suggest(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingCredential(NAME))?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: 100,
            temperature: 0.7,
        };

        tracing::debug!(model = %self.model, "calling OpenAI");

        let res = self
            .http
            .post(&url)
            .bearer_auth(api_key)
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

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::Malformed { backend: NAME, message: e.to_string() })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn unavailable_without_key() {
        let backend = OpenAiBackend::new(Some("   ".to_string()), DEFAULT_MODEL, Duration::from_secs(1));
        assert!(!backend.is_available().await);

        let err = backend.try_suggest("prompt").await.unwrap_err();
        assert_eq!(err, AiError::MissingCredential(NAME));
    }

    #[tokio::test]
    async fn returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "A light jacket is enough." } }
                ]
            })))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(Some("sk-test".to_string()), DEFAULT_MODEL, Duration::from_secs(2))
            .with_base_url(&server.uri());

        assert!(backend.is_available().await);
        let text = backend.try_suggest("prompt").await.expect("suggestion");
        assert_eq!(text, "A light jacket is enough.");
    }

    #[tokio::test]
    async fn no_choices_yields_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(Some("sk-test".to_string()), DEFAULT_MODEL, Duration::from_secs(2))
            .with_base_url(&server.uri());

        assert_eq!(backend.try_suggest("prompt").await.expect("ok"), "");
    }

    #[tokio::test]
    async fn unauthorized_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(Some("sk-bad".to_string()), DEFAULT_MODEL, Duration::from_secs(2))
            .with_base_url(&server.uri());

        let err = backend.try_suggest("prompt").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
