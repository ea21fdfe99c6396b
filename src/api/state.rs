//! Application state for the Leave Balance Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::LeaveBalanceService;
use crate::sources::InMemorySource;

/// Shared application state.
///
/// Holds the loaded configuration and a balance service reading employees
/// and leave requests from the seeded data, with settings from the
/// configuration.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: LeaveBalanceService,
}

impl AppState {
    /// Creates the state from a configuration and seeded HR data.
    pub fn new(config: ConfigLoader, data: InMemorySource) -> Self {
        let config = Arc::new(config);
        let data = Arc::new(data);
        let service = LeaveBalanceService::new(data.clone(), config.clone(), data);
        Self { config, service }
    }

    /// Creates the state with no seeded HR data.
    pub fn with_config(config: ConfigLoader) -> Self {
        Self::new(config, InMemorySource::default())
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a shared handle to the configuration loader.
    pub fn config_handle(&self) -> Arc<ConfigLoader> {
        Arc::clone(&self.config)
    }

    /// Returns the balance service over the seeded data.
    pub fn service(&self) -> &LeaveBalanceService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_service_reads_settings_from_config() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::with_config(config);

        let balances = state
            .service()
            .get_leave_balances("acme", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .unwrap();
        assert!(balances.is_empty());
        assert_eq!(state.config().metadata().code, "KW-PRIVATE");
    }
}
