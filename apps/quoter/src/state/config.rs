//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --catalog prices.json   --phone 98912...                           │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PACS_CATALOG_PATH   PACS_ORDER_PHONE   PACS_CURRENCY_LABEL         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/pacs-quoter/quoter.toml (Linux)                          │
//! │     ~/Library/Application Support/com.pacs.quoter/quoter.toml (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "/srv/pacs/prices.json"
//! require_all_extras = false
//!
//! [catalog.roles]
//! relay = { position = 7 }
//! sd_card = { name = "SD 16G" }
//!
//! [order]
//! phone = "989120000000"
//! greeting = "سلام وقت بخیر"
//!
//! [display]
//! currency_label = "ریال"
//! ```
//!
//! ## Thread Safety
//! Read-only after initialization, so no lock.

use pacs_core::catalog::RoleBindings;
use pacs_core::order::DEFAULT_GREETING;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File name looked up in the platform config dir.
pub const CONFIG_FILE_NAME: &str = "quoter.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid config value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Where the price sheet lives and how extras bind to its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub path: Option<PathBuf>,
    pub roles: RoleBindings,
    /// Refuse a sheet that leaves any extra unbound.
    pub require_all_extras: bool,
}

/// Order deep link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderSettings {
    /// International number without `+`, e.g. `989120000000`.
    pub phone: Option<String>,
    pub greeting: String,
}

impl Default for OrderSettings {
    fn default() -> Self {
        OrderSettings {
            phone: None,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_label: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_label: "ریال".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub order: OrderSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub phone: Option<String>,
}

impl ConfigState {
    /// Loads configuration from file, environment, and flags.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default)
    /// 3. Environment variables
    /// 4. Command line flags
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading quoter config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `PACS_*` variables looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PACS_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(phone) = lookup("PACS_ORDER_PHONE") {
            self.order.phone = Some(phone);
        }

        if let Some(label) = lookup("PACS_CURRENCY_LABEL") {
            self.display.currency_label = label;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.catalog_path {
            self.catalog.path = Some(path.clone());
        }
        if let Some(phone) = &overrides.phone {
            self.order.phone = Some(phone.clone());
        }
    }

    /// Normalizes and checks the order phone number.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if let Some(raw) = self.order.phone.take() {
            let phone: String = raw
                .trim()
                .trim_start_matches('+')
                .chars()
                .filter(|c| !matches!(c, ' ' | '-'))
                .collect();
            if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::invalid(
                    "order.phone",
                    format!("'{}' is not an international phone number", raw),
                ));
            }
            self.order.phone = Some(phone);
        }
        Ok(())
    }

    /// Phone number for the order link.
    pub fn order_phone(&self) -> Result<&str, ConfigError> {
        self.order
            .phone
            .as_deref()
            .ok_or_else(|| ConfigError::invalid("order.phone", "not set (use --phone or PACS_ORDER_PHONE)"))
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pacs", "quoter")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
