//! Core library for the `weather-advisor` CLI.
//!
//! This crate defines:
//! - Configuration resolution (flags, config file, environment, defaults)
//! - Weather providers and IP-based city detection
//! - Rule-based and AI-generated clothing suggestions
//! - Localized report assembly
//!
//! It is used by `advisor-cli`, but can also be reused by other binaries or services.

pub mod ai;
pub mod classifier;
pub mod config;
pub mod locale;
pub mod locate;
pub mod model;
pub mod period;
pub mod provider;
pub mod regional;
pub mod report;
pub mod suggestion;

pub use ai::{AiError, AiMode, AiOrchestrator, SuggestionBackend};
pub use classifier::{TemperatureBand, classify};
pub use config::{Overrides, ProviderConfig, Settings, UserConfig};
pub use locale::{Language, catalog};
pub use model::{
    SuggestionRequest, SuggestionResult, SuggestionSource, WeatherObservation, WeatherRequest,
};
pub use provider::{ProviderId, WeatherProvider};
pub use report::{Report, assemble};
