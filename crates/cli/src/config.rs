//! # CLI Configuration Module
//!
//! Settings are read from environment variables, after the binary has loaded
//! any `.env` file.
//!
//! ## Environment Variables
//!
//! - `SLOTWISE_STORE_DIR`: Directory holding the slot store (default: ".slotwise")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `SLOTWISE_TIMEZONE`: Device timezone; falls back to `TZ`, then "UTC"

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use slotwise_core::time::parse_timezone;
use tracing::Level;

pub const DEFAULT_STORE_DIR: &str = ".slotwise";

/// Configuration for the slotwise command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory the file blob store lives in
    pub store_dir: PathBuf,

    /// Log level for the application
    pub log_level: Level,

    /// Zone used when a command does not name one
    pub default_timezone: Tz,
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new AppConfig from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configured timezone is not
    /// a known IANA identifier.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_dir = lookup("SLOTWISE_STORE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let timezone_name = lookup("SLOTWISE_TIMEZONE")
            .or_else(|| lookup("TZ"))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "UTC".to_string());
        let default_timezone = parse_timezone(&timezone_name)
            .wrap_err("SLOTWISE_TIMEZONE (or TZ) must name an IANA timezone")?;

        Ok(Self {
            store_dir,
            log_level,
            default_timezone,
        })
    }

    /// Same configuration pointing at another store directory.
    pub fn with_store_dir(mut self, store_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = store_dir {
            self.store_dir = dir;
        }
        self
    }
}
