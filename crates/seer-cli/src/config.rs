// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use anyhow::Context;
use seer_core::SeerError;
use seer_service::ForecastConfig;
use seer_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeerConfig {
    pub store: StoreConfig,
    pub forecast: ForecastConfig,
    pub logging: LoggingConfig,
}

impl SeerConfig {
    /// Reads `path` as JSON, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file '{}'", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config file '{}'", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SeerError> {
        self.store.validate()?;
        self.forecast.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(SeerError::invalid_parameter(
                "logging.level must be non-empty",
            ));
        }
        Ok(())
    }
}
