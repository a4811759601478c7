//! Application state for the attendance and liquidation API.

use std::sync::Arc;

use crate::config::PayrollConfig;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the loaded payroll configuration and the sink Execute-mode
/// reports are persisted to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PayrollConfig>,
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates application state over the given configuration.
    pub fn new(config: PayrollConfig) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Returns the payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the report persistence store.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
