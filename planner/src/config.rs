//! # config
//!
//! why: read the deployment's static settings once at startup
//! relations: produces the StoreConfig menu-storage opens its backend from
//! what: PlannerConfig, figment layering, ConfigError
//!
//! Sources, highest priority first:
//! 1. environment variables `MENU_PLANNER_*`, `__` separating sections
//!    (`MENU_PLANNER_GSHEETS__ENABLED=true` -> `gsheets.enabled`)
//! 2. the toml file given with `--config`, else `./menu-planner.toml`
//! 3. built-in defaults

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use menu_storage::{SheetsConfig, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "menu-planner.toml";

pub const ENV_PREFIX: &str = "MENU_PLANNER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timezone() -> String {
    "Asia/Jerusalem".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    /// holds the catalog csv files and the local menu log
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// iana zone every timestamp is written in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub gsheets: SheetsConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            timezone: default_timezone(),
            gsheets: SheetsConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from defaults, the toml file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path)?.extract()?;
        config.timezone()?;
        Ok(config)
    }

    /// Same as [`load`](Self::load) after reading `.env` from the working directory, if any.
    ///
    /// A `.env` that exists but does not parse is an error: the lines after the
    /// bad one would otherwise be dropped silently.
    pub fn load_with_dotenv(path: Option<&Path>) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    field: ".env".into(),
                    reason: e.to_string(),
                })
            }
        }
        Self::load(path)
    }

    /// Build the figment provider chain.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::InvalidValue {
                        field: "--config".into(),
                        reason: format!("{} does not exist", path.display()),
                    });
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "timezone".into(),
                reason: e.to_string(),
            })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: self.data_dir.clone(),
            sheets: self.gsheets.clone(),
        }
    }
}
