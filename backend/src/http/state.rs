//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::SimulatorConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration; supplies defaults for omitted query parameters
    pub config: Arc<SimulatorConfig>,
}

impl AppState {
    /// Create a new application state with the given configuration.
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}
