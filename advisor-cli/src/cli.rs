use advisor_core::{
    AiOrchestrator, Language, Overrides, ProviderId, Settings, UserConfig, WeatherProvider, WeatherRequest,
    assemble, catalog,
    locate::{CityResolver, normalize_city},
    provider::provider_from_key,
    suggestion::{build_request, report_for, resolve},
};
use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use std::io::{self, Write};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-advisor", version, about = "Weather and clothing advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// City to look up; detected from your IP address when omitted.
    #[arg(long)]
    pub city: Option<String>,

    /// AI backend: auto, ollama (or local), openai, off.
    #[arg(long, value_name = "MODE")]
    pub ai_mode: Option<String>,

    /// Output language: ja, zh or en.
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Show diagnostic logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub show_config: bool,

    /// Use rule-based suggestions only.
    #[arg(long)]
    pub no_ai: bool,

    /// Report AI failures instead of falling back to rule-based suggestions.
    #[arg(long)]
    pub no_fallback: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and preferences interactively.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Some(Command::Configure { provider }) = &self.command {
            return configure(provider.as_deref());
        }

        let user_config = UserConfig::load_or_create()?;
        let settings = Settings::from_process_env(&self.overrides(), &user_config)?;

        if self.show_config {
            print_settings(&settings)?;
            return Ok(());
        }

        advise(&settings).await
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            city: self.city.clone(),
            language: self.lang.clone(),
            ai_mode: self.ai_mode.clone(),
            no_ai: self.no_ai,
            no_fallback: self.no_fallback,
        }
    }
}

/// Fetch weather, resolve a suggestion and print the report.
async fn advise(settings: &Settings) -> Result<()> {
    let outcome = match Advisor::from_settings(settings) {
        Ok(advisor) => advisor.advise(settings, Local::now().naive_local()).await,
        Err(err) => Outcome::MissingCredential(err.to_string()),
    };

    outcome.write_to(settings.language, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(())
}

/// Collaborators of a single advice run.
#[derive(Debug)]
struct Advisor {
    provider: Box<dyn WeatherProvider>,
    resolver: CityResolver,
    orchestrator: AiOrchestrator,
}

/// How a run ended; every variant exits cleanly.
#[derive(Debug, PartialEq)]
enum Outcome {
    MissingCredential(String),
    WeatherUnavailable,
    AiFailed(String),
    Report { text: String, fallback_reason: Option<String> },
}

impl Advisor {
    /// Fails only when the weather provider has no API key.
    fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            provider: provider_from_key(settings.weather_provider, settings.weather_api_key.as_deref())?,
            resolver: CityResolver::new(),
            orchestrator: AiOrchestrator::from_settings(settings),
        })
    }

    async fn advise(&self, settings: &Settings, now: NaiveDateTime) -> Outcome {
        let city = match &settings.city {
            Some(city) => city.clone(),
            None => self.resolver.resolve().await,
        };
        let city = normalize_city(&city);
        tracing::debug!(city = %city, provider = %settings.weather_provider, "looking up weather");

        let request = WeatherRequest { city, language: settings.language };
        let observation = match self.provider.get_weather(&request).await {
            Ok(observation) => observation,
            Err(err) => {
                tracing::warn!(error = ?err, "weather lookup failed");
                return Outcome::WeatherUnavailable;
            }
        };

        let request = build_request(&observation, settings.language, settings.ai_mode, now);
        tracing::debug!(
            city = %request.city,
            season = request.season.as_str(),
            temperature = request.temperature_c,
            "built suggestion request"
        );

        let suggestion = resolve(&request, &self.orchestrator, settings.fallback_enabled).await;
        if !suggestion.succeeded {
            return Outcome::AiFailed(suggestion.error_reason.unwrap_or_default());
        }

        Outcome::Report {
            text: assemble(&report_for(&request, &suggestion)),
            // Rule-based text carries a reason only when it replaced a failed AI call.
            fallback_reason: suggestion.error_reason,
        }
    }
}

impl Outcome {
    fn write_to(&self, language: Language, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        let messages = &catalog(language).messages;

        match self {
            Outcome::MissingCredential(message) => writeln!(err, "❌ {message}"),
            Outcome::WeatherUnavailable => writeln!(out, "{}", messages.weather_unavailable),
            Outcome::AiFailed(reason) => writeln!(err, "❌ {}: {reason}", messages.ai_unavailable),
            Outcome::Report { text, fallback_reason } => {
                if let Some(reason) = fallback_reason {
                    writeln!(err, "⚠️  {} ({reason})", messages.ai_fallback)?;
                }
                writeln!(out, "{text}")
            }
        }
    }
}

fn print_settings(settings: &Settings) -> Result<()> {
    println!("Config file: {}", UserConfig::config_file_path()?.display());
    for (key, value) in settings.describe() {
        println!("  {key:<17} {value}");
    }
    Ok(())
}

fn configure(provider: Option<&str>) -> Result<()> {
    let mut config = UserConfig::load_or_create()?;

    let id = match provider {
        Some(name) => ProviderId::try_from(name)?,
        None => Select::new("Weather provider:", ProviderId::all().to_vec()).prompt()?,
    };

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key for '{id}' must not be empty");
    }
    config.upsert_provider_api_key(id, api_key.to_string());

    if config.default_provider.as_deref() != Some(id.as_str())
        && Confirm::new(&format!("Make {id} the default provider?")).with_default(true).prompt()?
    {
        config.set_default_provider(id);
    }

    let current = config.language.as_deref().map(Language::from_code).unwrap_or_default();
    let languages = Language::all().to_vec();
    let cursor = languages.iter().position(|l| *l == current).unwrap_or(0);
    let language = Select::new("Output language:", languages).with_starting_cursor(cursor).prompt()?;
    config.language = Some(language.as_str().to_string());

    if Confirm::new("Store an OpenAI API key for AI suggestions?").with_default(false).prompt()? {
        let key = Password::new("OpenAI API key:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;
        config.openai_api_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());
    }

    config.save()?;
    println!("✅ Saved configuration to {}", UserConfig::config_file_path()?.display());

    Ok(())
}
