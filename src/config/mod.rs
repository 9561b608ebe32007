use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        aggregate::AggregationMode,
        projection::DEFAULT_HORIZON_MONTHS,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    errors::{EngineError, Result},
    ledger::ViewPeriod,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub default_view: ViewPeriod,
    #[serde(default)]
    pub aggregation_mode: AggregationMode,
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_view: ViewPeriod::Monthly,
            aggregation_mode: AggregationMode::RecurringDefinitions,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            last_user: None,
        }
    }
}

impl Config {
    /// Applies `key=value` style updates coming from the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "view" | "default_view" => {
                self.default_view = ViewPeriod::parse(value).ok_or_else(|| {
                    EngineError::ConfigError(format!("unknown view `{value}`"))
                })?
            }
            "mode" | "aggregation_mode" => {
                self.aggregation_mode = AggregationMode::parse(value).ok_or_else(|| {
                    EngineError::ConfigError(format!("unknown aggregation mode `{value}`"))
                })?
            }
            "horizon" | "horizon_months" => {
                self.horizon_months = value.parse().map_err(|_| {
                    EngineError::ConfigError(format!(
                        "horizon must be a whole number, got `{value}`"
                    ))
                })?
            }
            other => {
                return Err(EngineError::ConfigError(format!(
                    "unknown configuration key `{other}`"
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| EngineError::ConfigError(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
