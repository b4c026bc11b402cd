// src/config.rs
//! Application configuration: `config.yaml` sections selected by environment,
//! with credentials and a few endpoints overridable from the process
//! environment. Loaded once at startup and handed to the components that need
//! it; nothing below `main` reads the environment directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::trends::defaults::DEFAULT_SEED_PROFILES;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Section this config was read from (`local` or `production`).
    #[serde(skip)]
    pub environment: String,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub skills_api: SkillsApiConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub trends: TrendsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// JSON log file, truncated at startup. Logs go to stdout when unset.
    pub file: Option<PathBuf>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillsApiConfig {
    #[serde(default = "default_skills_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_skills_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

/// Settings the trend pipeline is constructed with.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendsConfig {
    #[serde(default = "default_freshness_hours")]
    pub freshness_hours: i64,
    #[serde(default = "default_seed_profiles")]
    pub seed_profiles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/linkedcraft.db")
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_skills_url() -> String {
    "https://linkedin-data-api.p.rapidapi.com/skills".to_string()
}

fn default_skills_timeout() -> u64 {
    30
}

fn default_llm_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_freshness_hours() -> i64 {
    6
}

fn default_seed_profiles() -> Vec<String> {
    DEFAULT_SEED_PROFILES.iter().map(|s| s.to_string()).collect()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

impl Default for SkillsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_skills_url(),
            api_key: None,
            timeout_seconds: default_skills_timeout(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_url(),
            api_key: None,
            model: default_llm_model(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            freshness_hours: default_freshness_hours(),
            seed_profiles: default_seed_profiles(),
        }
    }
}

impl AppConfig {
    /// Load `path`, pick the section for the current environment, apply
    /// environment overrides and resolve relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let environment = Self::get_environment();

        if !path.exists() {
            anyhow::bail!(
                "{} not found. Server cannot start without configuration.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config = Self::from_yaml_str(&content, &environment)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.database_path = Self::resolve_path(&config.database_path)?;
        if let Some(file) = &config.logging.file {
            config.logging.file = Some(Self::resolve_path(file)?);
        }

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("LINKEDCRAFT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse configuration YAML")?;

        let mut config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };
        config.environment = if environment == "production" {
            "production".to_string()
        } else {
            "local".to_string()
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Blank values count as unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get("SKILLS_API_KEY") {
            self.skills_api.api_key = Some(key);
        }
        if let Some(url) = get("SKILLS_API_URL") {
            self.skills_api.base_url = url;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get("OPENAI_API_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.llm.model = model;
        }
        if let Some(port) = get("ROCKET_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        // Blank keys in the file mean "not configured".
        self.skills_api.api_key = self.skills_api.api_key.take().filter(|k| !k.trim().is_empty());
        self.llm.api_key = self.llm.api_key.take().filter(|k| !k.trim().is_empty());

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.trends.freshness_hours <= 0 {
            anyhow::bail!("trends.freshness_hours must be positive");
        }
        if self.trends.seed_profiles.iter().all(|s| s.trim().is_empty()) {
            anyhow::bail!("trends.seed_profiles must contain at least one profile");
        }
        Ok(())
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure the database parent directory exists. `Database::new` expects
    /// it to be there.
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(db_parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(db_parent).await.with_context(|| {
                format!("Failed to create database directory: {}", db_parent.display())
            })?;
        }
        Ok(())
    }
}
