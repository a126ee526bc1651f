use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::{ambito, bcra, coingecko, dolarapi, yahoo_chart};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
}

/// Optional per-source base-URL overrides. Absent sections fall back to the
/// real upstreams; tests point these at a mock server.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub dolarapi: Option<EndpointConfig>,
    pub coingecko: Option<EndpointConfig>,
    pub bcra: Option<EndpointConfig>,
    pub ambito: Option<EndpointConfig>,
    pub yahoo: Option<EndpointConfig>,
}

/// Optional feed URLs for the two user-configurable rate tables. When a URL
/// is absent the built-in table is used.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TablesConfig {
    pub deposit_rates_url: Option<String>,
    pub wallet_rates_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    /// Cache validity window per source.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_equity_symbol")]
    pub equity_symbol: String,
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_equity_symbol() -> String {
    yahoo_chart::DEFAULT_SYMBOL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            tables: TablesConfig::default(),
            ttl_seconds: default_ttl_seconds(),
            timeout_seconds: default_timeout_seconds(),
            equity_symbol: default_equity_symbol(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or the built-in defaults when none has
    /// been written yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "pulso", "pulso")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn dolarapi_base_url(&self) -> &str {
        self.providers
            .dolarapi
            .as_ref()
            .map_or(dolarapi::DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn coingecko_base_url(&self) -> &str {
        self.providers
            .coingecko
            .as_ref()
            .map_or(coingecko::DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn bcra_base_url(&self) -> &str {
        self.providers
            .bcra
            .as_ref()
            .map_or(bcra::DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn ambito_base_url(&self) -> &str {
        self.providers
            .ambito
            .as_ref()
            .map_or(ambito::DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn yahoo_base_url(&self) -> &str {
        self.providers
            .yahoo
            .as_ref()
            .map_or(yahoo_chart::DEFAULT_BASE_URL, |p| &p.base_url)
    }
}
