use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    ai::{AiMode, ollama, openai},
    locale::Language,
    provider::ProviderId,
};

pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Configuration for a single weather provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Preferences stored on disk. Unset fields fall through to the environment.
///
/// Example TOML:
/// ```toml
/// language = "en"
/// ai_mode = "auto"
///
/// [providers.openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    pub language: Option<String>,
    pub default_city: Option<String>,
    pub ai_mode: Option<String>,
    pub ai_timeout_secs: Option<u64>,
    pub fallback: Option<bool>,

    pub ollama_url: Option<String>,
    pub ollama_model: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,

    /// Optional default provider id, e.g. "openweather" or "weatherapi".
    pub default_provider: Option<String>,
    pub providers: HashMap<String, ProviderConfig>,
}

impl UserConfig {
    /// Contents written on first run. Secrets and city stay unset.
    pub fn starter() -> Self {
        Self {
            language: Some(Language::default().as_str().to_string()),
            ai_mode: Some(AiMode::default().as_str().to_string()),
            ai_timeout_secs: Some(DEFAULT_AI_TIMEOUT_SECS),
            fallback: Some(true),
            ..Self::default()
        }
    }

    /// Return the configured default provider, if any, as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<Option<ProviderId>> {
        self.default_provider.as_deref().map(ProviderId::try_from).transpose()
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Set/replace a provider API key; the first configured provider becomes the default.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    /// Load config from the platform path, writing the starter config when absent.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_file_path()?)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            let cfg = Self::starter();
            cfg.save_to(path)?;
            tracing::info!(path = %path.display(), "created default config file");
            return Ok(cfg);
        }

        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: UserConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-advisor", "weather-advisor")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Values given on the command line; they take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub city: Option<String>,
    pub language: Option<String>,
    pub ai_mode: Option<String>,
    pub no_ai: bool,
    pub no_fallback: bool,
}

/// Fully resolved configuration handed to each component.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: Language,
    /// `None` means "detect from IP".
    pub city: Option<String>,
    pub ai_mode: AiMode,
    pub ai_timeout: Duration,
    pub fallback_enabled: bool,
    pub weather_provider: ProviderId,
    pub weather_api_key: Option<String>,
    pub ollama_url: String,
    pub ollama_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
}

impl Settings {
    /// Resolve flags > config file > environment > defaults.
    ///
    /// `env` looks up a variable by name; blank values count as unset.
    pub fn resolve<F>(overrides: &Overrides, file: &UserConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let language = overrides
            .language
            .clone()
            .or_else(|| file.language.clone())
            .or_else(|| env("ADVISOR_LANG"))
            .map(|code| Language::from_code(&code))
            .unwrap_or_default();

        let city = overrides
            .city
            .clone()
            .or_else(|| file.default_city.clone())
            .or_else(|| env("DEFAULT_CITY"))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let ai_mode = if overrides.no_ai {
            AiMode::Off
        } else {
            overrides
                .ai_mode
                .clone()
                .or_else(|| file.ai_mode.clone())
                .or_else(|| env("AI_MODE"))
                .map(|mode| AiMode::try_from(mode.as_str()))
                .transpose()?
                .unwrap_or_default()
        };

        let timeout_secs = match file.ai_timeout_secs {
            Some(secs) => secs,
            None => env("AI_TIMEOUT")
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .with_context(|| format!("Invalid AI_TIMEOUT value '{v}', expected seconds"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_AI_TIMEOUT_SECS),
        };

        let fallback_enabled = if overrides.no_fallback {
            false
        } else {
            match file.fallback {
                Some(flag) => flag,
                None => env("AI_FALLBACK").map(|v| parse_flag(&v)).transpose()?.unwrap_or(true),
            }
        };

        let provider_key = |id: ProviderId| {
            file.provider_api_key(id)
                .map(str::to_string)
                .filter(|k| !k.trim().is_empty())
                .or_else(|| env(id.env_key()))
        };

        let weather_provider = match file.default_provider_id()? {
            Some(id) => id,
            None => ProviderId::all()
                .iter()
                .copied()
                .find(|id| provider_key(*id).is_some())
                .unwrap_or(ProviderId::OpenWeather),
        };
        let weather_api_key = provider_key(weather_provider);

        Ok(Self {
            language,
            city,
            ai_mode,
            ai_timeout: Duration::from_secs(timeout_secs),
            fallback_enabled,
            weather_provider,
            weather_api_key,
            ollama_url: file
                .ollama_url
                .clone()
                .or_else(|| env("OLLAMA_URL"))
                .unwrap_or_else(|| ollama::DEFAULT_URL.to_string()),
            ollama_model: file
                .ollama_model
                .clone()
                .or_else(|| env("OLLAMA_MODEL"))
                .unwrap_or_else(|| ollama::DEFAULT_MODEL.to_string()),
            openai_api_key: file
                .openai_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| env("OPENAI_API_KEY")),
            openai_model: file
                .openai_model
                .clone()
                .or_else(|| env("OPENAI_MODEL"))
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
        })
    }

    /// Resolve against the process environment.
    pub fn from_process_env(overrides: &Overrides, file: &UserConfig) -> Result<Self> {
        Self::resolve(overrides, file, |key| std::env::var(key).ok())
    }

    /// Human-readable `(key, value)` pairs with secrets masked.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let secret = |key: &Option<String>| key.as_deref().map(mask_secret).unwrap_or_else(|| "(not set)".to_string());

        vec![
            ("language", self.language.to_string()),
            ("city", self.city.clone().unwrap_or_else(|| "(detect from IP)".to_string())),
            ("ai_mode", self.ai_mode.to_string()),
            ("ai_timeout", format!("{}s", self.ai_timeout.as_secs())),
            ("fallback", self.fallback_enabled.to_string()),
            ("weather_provider", self.weather_provider.to_string()),
            ("weather_api_key", secret(&self.weather_api_key)),
            ("ollama_url", self.ollama_url.clone()),
            ("ollama_model", self.ollama_model.clone()),
            ("openai_api_key", secret(&self.openai_api_key)),
            ("openai_model", self.openai_model.clone()),
        ]
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("Invalid boolean value '{value}', expected true or false")),
    }
}

/// Keep the first five characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(5).collect();
    format!("{visible}*****")
}
