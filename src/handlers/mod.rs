//! HTTP request handlers for the Chatrelay API

use crate::config::Config;
use crate::provider::TextGenerationProvider;
use std::sync::Arc;

pub mod ask;
pub mod health;

/// Application state shared across all handlers
///
/// Holds the configuration and the provider adapter, both established once at
/// startup and read-only afterwards. The provider is injected as a trait
/// object so tests can substitute a stub without touching the network.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    provider: Arc<dyn TextGenerationProvider>,
}

impl AppState {
    /// Create a new AppState from configuration and a provider adapter
    pub fn new(config: Arc<Config>, provider: Arc<dyn TextGenerationProvider>) -> Self {
        Self { config, provider }
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the provider adapter
    pub fn provider(&self) -> &dyn TextGenerationProvider {
        self.provider.as_ref()
    }
}
