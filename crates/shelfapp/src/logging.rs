use crate::error::{Result, ShelfError};
use serde::Deserialize;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Max level written; anything below is dropped.
    pub level: String,

    /// One JSON object per line instead of the human readable format.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json: false,
        }
    }
}

/// Installs a global fmt subscriber for applications embedding the crate.
///
/// Does nothing if a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let level = parse_level(&config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if !installed {
        tracing::debug!("Global subscriber already set, keeping it");
    }
    Ok(())
}

pub fn parse_level(level: &str) -> Result<Level> {
    match level.to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        other => Err(ShelfError::Store(format!(
            "Log level must be one of TRACE, DEBUG, INFO, WARN, ERROR (got {})",
            other
        ))),
    }
}
