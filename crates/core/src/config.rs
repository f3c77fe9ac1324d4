//! Configuration management for the Shelfmate catalog assistant.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (.shelfmate/config.yaml)
//!
//! The configuration is workspace-centric: the catalog database and the
//! config file both live under `.shelfmate/` in the workspace directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global options that affect behavior across
/// commands: which oracle provider to use, where the catalog lives, and how
/// the catalog presents itself (currency, seed size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .shelfmate/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Oracle provider (e.g., "gemini", "ollama")
    pub provider: String,

    /// Model identifier for the oracle
    pub model: String,

    /// API key for the oracle provider, if one is required
    pub api_key: Option<String>,

    /// Custom oracle endpoint URL
    pub endpoint: Option<String>,

    /// ISO currency code for the whole catalog
    pub currency: String,

    /// Number of synthetic products to seed when the catalog is empty
    pub seed_count: u32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    oracle: Option<OracleConfig>,
    catalog: Option<CatalogConfig>,
    logging: Option<LoggingConfig>,
}

/// Oracle section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OracleConfig {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    endpoint: Option<String>,
}

/// Catalog section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogConfig {
    currency: Option<String>,
    #[serde(rename = "seedCount")]
    seed_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            endpoint: None,
            currency: "PEN".to_string(),
            seed_count: 500,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `SHELFMATE_WORKSPACE`: Override workspace path
    /// - `SHELFMATE_CONFIG`: Path to config file
    /// - `SHELFMATE_PROVIDER`: Oracle provider
    /// - `SHELFMATE_MODEL`: Model identifier
    /// - `SHELFMATE_API_KEY`: API key
    /// - `SHELFMATE_ENDPOINT`: Custom oracle endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// A missing API key is not an error here: an unconfigured oracle is a
    /// valid steady state and the assistant degrades to fixed fallback text.
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("SHELFMATE_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("SHELFMATE_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Validate workspace exists
        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".shelfmate/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("SHELFMATE_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("SHELFMATE_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("SHELFMATE_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("SHELFMATE_API_KEY").ok();
        }

        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(oracle) = config_file.oracle {
            if let Some(provider) = oracle.provider {
                result.provider = provider;
            }
            if let Some(model) = oracle.model {
                result.model = model;
            }
            if let Some(endpoint) = oracle.endpoint {
                result.endpoint = Some(endpoint);
            }
            // The key itself never lives in the file, only the env var name
            if let Some(env_var) = oracle.api_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.api_key = Some(key);
                }
            }
        }

        if let Some(catalog) = config_file.catalog {
            if let Some(currency) = catalog.currency {
                result.currency = currency;
            }
            if let Some(seed_count) = catalog.seed_count {
                result.seed_count = seed_count;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .shelfmate directory.
    pub fn shelfmate_dir(&self) -> PathBuf {
        self.workspace.join(".shelfmate")
    }

    /// Get the path to the catalog database.
    pub fn catalog_path(&self) -> PathBuf {
        self.shelfmate_dir().join("catalog.db")
    }

    /// Ensure the .shelfmate directory exists.
    pub fn ensure_shelfmate_dir(&self) -> AppResult<()> {
        let dir = self.shelfmate_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .shelfmate directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Resolve the API key for the active provider.
    ///
    /// Checks the explicit config/`SHELFMATE_API_KEY` value first, then the
    /// provider's conventional environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        let env_var = match self.provider.as_str() {
            "gemini" => Some("GEMINI_API_KEY"),
            _ => None,
        };

        env_var.and_then(|var| std::env::var(var).ok())
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["gemini", "ollama", "mock"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(AppError::Config(format!(
                "Currency must be a three-letter ISO code, got: {}",
                self.currency
            )));
        }

        Ok(())
    }
}
