//! Application configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::SearchLimits;

/// Top-level service configuration.
///
/// Every field has a default, so a config file only needs to spell out
/// what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Address to bind the HTTP server on.
    pub address: String,
    pub port: u16,
    /// How long generation results stay cached, in seconds.
    pub cache_ttl_secs: u64,
    /// Default search ceilings; requests may override per call.
    pub limits: SearchLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8085,
            cache_ttl_secs: 10 * 60,
            limits: SearchLimits::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Parsed configuration with defaults filled in
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The `address:port` string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
