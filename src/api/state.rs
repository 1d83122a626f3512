//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{CityRepository, CityStore, Database};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// City repository
    pub cities: Arc<dyn CityRepository>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state backed by the database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let cities = Arc::new(CityStore::new(
            database.get_connection(),
            config.query_timeout(),
        ));

        Self { cities, database }
    }

    /// Create new application state with a manually injected repository.
    pub fn new(cities: Arc<dyn CityRepository>, database: Arc<Database>) -> Self {
        Self { cities, database }
    }
}
