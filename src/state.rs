//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::store::ComparisonStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: ComparisonStore,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: Config) -> Self {
        let store = ComparisonStore::new(config.compare.store_capacity);
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the comparison store
    pub fn store(&self) -> &ComparisonStore {
        &self.inner.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_cheaply_cloneable() {
        let state = AppState::new(Config::default());
        let clone = state.clone();
        assert_eq!(clone.config().server.port, state.config().server.port);
        assert!(state.store().is_empty());
    }
}
