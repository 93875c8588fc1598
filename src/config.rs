use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    pub profiles: ProfileSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    /// Seed an empty course table with the built-in catalog
    #[serde(default = "default_true")]
    pub seed_on_empty: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis tier is skipped when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_results: default_max_results(),
        }
    }
}

fn default_min_score() -> f64 { crate::core::DEFAULT_MIN_SCORE }
fn default_max_results() -> usize { crate::core::DEFAULT_MAX_RESULTS }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_location_baseline")]
    pub location_baseline: f64,
    #[serde(default = "default_education_weight")]
    pub education: f64,
    #[serde(default = "default_interest_per_match")]
    pub interest_per_match: f64,
    #[serde(default = "default_interest_cap")]
    pub interest_cap: f64,
    #[serde(default = "default_age_near_weight")]
    pub age_near: f64,
    #[serde(default = "default_age_far_weight")]
    pub age_far: f64,
    #[serde(default = "default_program_bonus")]
    pub program_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            location_baseline: default_location_baseline(),
            education: default_education_weight(),
            interest_per_match: default_interest_per_match(),
            interest_cap: default_interest_cap(),
            age_near: default_age_near_weight(),
            age_far: default_age_far_weight(),
            program_bonus: default_program_bonus(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            location: config.location,
            location_baseline: config.location_baseline,
            education: config.education,
            interest_per_match: config.interest_per_match,
            interest_cap: config.interest_cap,
            age_near: config.age_near,
            age_far: config.age_far,
            program_bonus: config.program_bonus,
        }
    }
}

fn default_location_weight() -> f64 { 30.0 }
fn default_location_baseline() -> f64 { 10.0 }
fn default_education_weight() -> f64 { 25.0 }
fn default_interest_per_match() -> f64 { 8.0 }
fn default_interest_cap() -> f64 { 25.0 }
fn default_age_near_weight() -> f64 { 20.0 }
fn default_age_far_weight() -> f64 { 10.0 }
fn default_program_bonus() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Layered settings: `config/default`, `config/local`, `CONECTA__*`
    /// environment variables, then `DATABASE_URL`. Later sources win.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CONECTA__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Settings from a single file plus environment overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CONECTA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// DATABASE_URL takes precedence over every other database url source
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
