//! Application state for the tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, TariffTable};

/// Shared application state.
///
/// Holds the tariff table every request is calculated against. The table is
/// immutable, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The active tariff table.
    table: Arc<TariffTable>,
}

impl AppState {
    /// Creates a new application state serving the given tariff table.
    pub fn new(table: TariffTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Creates a new application state from a configuration loader.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self::new(loader.into_table())
    }

    /// Returns a reference to the active tariff table.
    pub fn table(&self) -> &TariffTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_table() {
        let state = AppState::from_loader(ConfigLoader::builtin());
        let clone = state.clone();
        assert!(std::ptr::eq(state.table(), clone.table()));
        assert_eq!(clone.table().year, 2026);
    }
}
