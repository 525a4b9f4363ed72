//! Shared application state.

use std::time::Duration;

use crate::config::AppConfig;
use crate::generator::cache::GenerationCache;

/// State shared by every endpoint, behind an `Arc`.
pub struct AppState {
    pub config: AppConfig,
    pub cache: GenerationCache,
}

impl AppState {
    /// Creates app state from the loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        let cache = GenerationCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self { config, cache }
    }
}
