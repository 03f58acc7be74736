//! Generative clothing suggestions with backend auto-detection.

use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use thiserror::Error;

use crate::{
    ai::{ollama::OllamaBackend, openai::OpenAiBackend},
    config::Settings,
    model::{SuggestionRequest, SuggestionResult},
};

pub mod ollama;
pub mod openai;
pub mod prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AiMode {
    Off,
    #[default]
    Auto,
    Ollama,
    OpenAi,
}

impl AiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiMode::Off => "off",
            AiMode::Auto => "auto",
            AiMode::Ollama => "ollama",
            AiMode::OpenAi => "openai",
        }
    }

    pub const fn all() -> &'static [AiMode] {
        &[AiMode::Off, AiMode::Auto, AiMode::Ollama, AiMode::OpenAi]
    }

    /// Backend name for modes that request one explicitly.
    fn backend_name(&self) -> Option<&'static str> {
        match self {
            AiMode::Ollama => Some(ollama::NAME),
            AiMode::OpenAi => Some(openai::NAME),
            AiMode::Off | AiMode::Auto => None,
        }
    }
}

impl std::fmt::Display for AiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AiMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "off" | "none" => Ok(AiMode::Off),
            "auto" => Ok(AiMode::Auto),
            "ollama" | "local" => Ok(AiMode::Ollama),
            "openai" => Ok(AiMode::OpenAi),
            _ => Err(anyhow::anyhow!(
                "Unknown AI mode '{value}'. Supported modes: auto, ollama (or local), openai, off."
            )),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("AI suggestions are turned off")]
    Disabled,

    #[error("no AI backend available: local Ollama is not responding and no OpenAI API key is configured")]
    NoBackendAvailable,

    #[error("no API key configured for {0}")]
    MissingCredential(&'static str),

    #[error("could not connect to {backend}: {message}")]
    Connection { backend: &'static str, message: String },

    #[error("{backend} did not answer within {seconds}s")]
    Timeout { backend: &'static str, seconds: u64 },

    #[error("{backend} returned status {status}: {body}")]
    Status { backend: &'static str, status: u16, body: String },

    #[error("could not parse {backend} response: {message}")]
    Malformed { backend: &'static str, message: String },

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),
}

impl AiError {
    pub(crate) fn from_reqwest(backend: &'static str, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            AiError::Timeout { backend, seconds: timeout.as_secs() }
        } else if err.is_decode() {
            AiError::Malformed { backend, message: err.to_string() }
        } else {
            AiError::Connection { backend, message: err.to_string() }
        }
    }
}

/// A generative service able to turn a prompt into a suggestion.
#[async_trait]
pub trait SuggestionBackend: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Whether auto-detection may select this backend.
    async fn is_available(&self) -> bool;

    async fn try_suggest(&self, prompt: &str) -> Result<String, AiError>;
}

/// Selects a backend for the requested mode and asks it once.
#[derive(Debug)]
pub struct AiOrchestrator {
    /// In auto-detection order.
    backends: Vec<Box<dyn SuggestionBackend>>,
}

impl AiOrchestrator {
    pub fn new(backends: Vec<Box<dyn SuggestionBackend>>) -> Self {
        Self { backends }
    }

    /// Local Ollama first, then the hosted OpenAI API.
    pub fn from_settings(settings: &Settings) -> Self {
        let ollama = OllamaBackend::new(&settings.ollama_url, &settings.ollama_model, settings.ai_timeout);
        let openai = OpenAiBackend::new(
            settings.openai_api_key.clone(),
            &settings.openai_model,
            settings.ai_timeout,
        );

        Self::new(vec![Box::new(ollama), Box::new(openai)])
    }

    async fn select(&self, mode: AiMode) -> Result<&dyn SuggestionBackend, AiError> {
        match mode {
            AiMode::Off => Err(AiError::Disabled),
            AiMode::Auto => {
                for backend in &self.backends {
                    if backend.is_available().await {
                        tracing::debug!(backend = backend.name(), "auto-detected AI backend");
                        return Ok(&**backend);
                    }
                    tracing::debug!(backend = backend.name(), "AI backend not available");
                }
                Err(AiError::NoBackendAvailable)
            }
            explicit => self
                .backends
                .iter()
                .find(|b| Some(b.name()) == explicit.backend_name())
                .map(|b| &**b)
                .ok_or(AiError::NoBackendAvailable),
        }
    }

    /// Single attempt; the reply is returned trimmed and must not be empty.
    pub async fn try_suggest(&self, request: &SuggestionRequest) -> Result<String, AiError> {
        let backend = self.select(request.ai_mode).await?;
        let prompt = prompt::build_prompt(request);

        tracing::debug!(backend = backend.name(), "requesting AI suggestion");
        let reply = backend.try_suggest(&prompt).await?;

        let trimmed = reply.trim();
        if trimmed.is_empty() {
            return Err(AiError::EmptyResponse(backend.name()));
        }

        Ok(trimmed.to_string())
    }

    pub async fn suggest(&self, request: &SuggestionRequest) -> SuggestionResult {
        match self.try_suggest(request).await {
            Ok(text) => SuggestionResult::from_ai(text),
            Err(err) => {
                tracing::warn!(error = %err, mode = %request.ai_mode, "AI suggestion failed");
                SuggestionResult::ai_failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{locale::Language, model::SuggestionSource, period::Season};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// Scripted backend that counts how often it is touched.
    #[derive(Debug)]
    pub(crate) struct FakeBackend {
        pub name: &'static str,
        pub available: bool,
        pub reply: Result<String, AiError>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        pub fn new(name: &'static str, available: bool, reply: Result<String, AiError>) -> Self {
            Self { name, available, reply, calls: Arc::new(AtomicUsize::new(0)) }
        }
    }

    #[async_trait]
    impl SuggestionBackend for FakeBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn is_available(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        async fn try_suggest(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    pub(crate) fn request(mode: AiMode) -> SuggestionRequest {
        SuggestionRequest {
            city: "Tokyo".to_string(),
            temperature_c: 3.0,
            condition: "light rain".to_string(),
            time_remark: "Evening temperatures expected to drop".to_string(),
            time_label: "Evening".to_string(),
            season: Season::Winter,
            regional_hint: None,
            language: Language::En,
            ai_mode: mode,
        }
    }

    #[test]
    fn ai_mode_as_str_roundtrip() {
        for mode in AiMode::all() {
            let parsed = AiMode::try_from(mode.as_str()).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
        assert_eq!(AiMode::try_from("LOCAL").expect("alias"), AiMode::Ollama);
    }

    #[test]
    fn unknown_ai_mode_error() {
        let err = AiMode::try_from("gemini").unwrap_err();
        assert!(err.to_string().contains("Unknown AI mode"));
    }

    #[tokio::test]
    async fn off_mode_touches_no_backend() {
        let ollama = FakeBackend::new(ollama::NAME, true, Ok("coat".into()));
        let calls = ollama.calls.clone();
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama)]);

        let result = orchestrator.suggest(&request(AiMode::Off)).await;

        assert!(!result.succeeded);
        assert_eq!(result.source, SuggestionSource::Ai);
        assert_eq!(result.error_reason.as_deref(), Some("AI suggestions are turned off"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn auto_prefers_first_available_backend() {
        let ollama = FakeBackend::new(ollama::NAME, false, Ok("from ollama".into()));
        let openai = FakeBackend::new(openai::NAME, true, Ok("  from openai \n".into()));
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama), Box::new(openai)]);

        let result = orchestrator.suggest(&request(AiMode::Auto)).await;

        assert!(result.succeeded);
        assert_eq!(result.text, "from openai");
        assert_eq!(result.source, SuggestionSource::Ai);
    }

    #[tokio::test]
    async fn auto_without_backends_reports_none_available() {
        let ollama = FakeBackend::new(ollama::NAME, false, Ok("unused".into()));
        let openai = FakeBackend::new(openai::NAME, false, Ok("unused".into()));
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama), Box::new(openai)]);

        let err = orchestrator.try_suggest(&request(AiMode::Auto)).await.unwrap_err();
        assert_eq!(err, AiError::NoBackendAvailable);
    }

    #[tokio::test]
    async fn selected_backend_is_tried_once_without_falling_through() {
        let ollama = FakeBackend::new(
            ollama::NAME,
            true,
            Err(AiError::Timeout { backend: ollama::NAME, seconds: 30 }),
        );
        let openai = FakeBackend::new(openai::NAME, true, Ok("never asked".into()));
        let openai_calls = openai.calls.clone();
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama), Box::new(openai)]);

        let err = orchestrator.try_suggest(&request(AiMode::Auto)).await.unwrap_err();

        assert!(matches!(err, AiError::Timeout { .. }));
        assert_eq!(openai_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn explicit_mode_skips_detection() {
        let ollama = FakeBackend::new(ollama::NAME, true, Ok("from ollama".into()));
        let ollama_calls = ollama.calls.clone();
        let openai = FakeBackend::new(openai::NAME, false, Ok("from openai".into()));
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama), Box::new(openai)]);

        let text = orchestrator.try_suggest(&request(AiMode::OpenAi)).await.expect("explicit backend");

        assert_eq!(text, "from openai");
        assert_eq!(ollama_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_reply_is_a_failure() {
        let ollama = FakeBackend::new(ollama::NAME, true, Ok(" \n\t ".into()));
        let orchestrator = AiOrchestrator::new(vec![Box::new(ollama)]);

        let result = orchestrator.suggest(&request(AiMode::Ollama)).await;

        assert!(!result.succeeded);
        assert_eq!(result.error_reason.as_deref(), Some("ollama returned an empty response"));
    }
}
