//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the application
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{BilledError, BilledResult};

use super::types::AppConfig;

/// Loads and provides access to the application configuration.
///
/// # Example
///
/// ```no_run
/// use billed::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/billed.yaml").unwrap();
/// println!("Bills route: {}", loader.config().routes.bills);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or misses a required field
    pub fn load<P: AsRef<Path>>(path: P) -> BilledResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BilledError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, session_key = %config.session_key, "Loaded configuration");

        Ok(Self { config })
    }

    /// Parses configuration from YAML text. `origin` names the source in errors.
    pub fn from_yaml(content: &str, origin: &str) -> BilledResult<Self> {
        Ok(Self {
            config: Self::parse(content, origin)?,
        })
    }

    fn parse(content: &str, origin: &str) -> BilledResult<AppConfig> {
        serde_yaml::from_str(content).map_err(|e| BilledError::ConfigParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
