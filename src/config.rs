use std::env::{self, VarError};

use tracing::Level;

use crate::error::AppError;

pub struct Config {
    pub environment: String,
    pub log_level: Level,
    pub bind_address: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            environment: "development".to_string(),
            log_level: Level::INFO,
            bind_address: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Builds the config from any variable source; absent variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Config::default();

        let environment = optional(&lookup, "ENVIRONMENT")?.unwrap_or(defaults.environment);
        let log_level = match optional(&lookup, "LOG_LEVEL")? {
            Some(level) => level
                .parse::<Level>()
                .map_err(|_| AppError::Config(format!("LOG_LEVEL '{level}' is not a log level")))?,
            None => defaults.log_level,
        };
        let bind_address = optional(&lookup, "BIND_ADDRESS")?;

        Ok(Config {
            environment,
            log_level,
            bind_address,
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, AppError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
