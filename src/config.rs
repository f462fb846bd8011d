//! Configuration management for labstore

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

use crate::derived::DEFAULT_WARNING_DAYS;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// How a store applies `list` responses that resolve out of order
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListPolicy {
    /// Whichever response arrives last overwrites the collection
    #[default]
    LastResponse,
    /// Responses to superseded requests are not applied
    LatestRequest,
}

#[derive(Debug, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct StoreConfig {
    pub list_policy: ListPolicy,
    #[validate(range(
        min = 1,
        max = 3650,
        message = "calibration_warning_days must be between 1 and 3650"
    ))]
    pub calibration_warning_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LABSTORE_), e.g. LABSTORE_GATEWAY__BASE_URL
            .add_source(
                Environment::with_prefix("LABSTORE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override gateway URL from LAB_API_URL env var if present
            .set_override_option("gateway.base_url", env::var("LAB_API_URL").ok())?
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize an assembled configuration and check value ranges
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;
        app.store
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid store configuration: {}", e)))?;
        Ok(app)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            list_policy: ListPolicy::default(),
            calibration_warning_days: DEFAULT_WARNING_DAYS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
