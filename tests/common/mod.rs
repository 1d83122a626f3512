//! Shared fixtures for integration tests.
//!
//! Each test gets its own SQLite file inside a temporary directory.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection};
use tempfile::TempDir;

use city_api::CityStore;

pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection plus the directory that owns the database file.
pub struct TestDb {
    pub connection: Arc<DatabaseConnection>,
    _dir: TempDir,
}

impl TestDb {
    pub fn store(&self) -> CityStore {
        CityStore::new(Arc::clone(&self.connection), QUERY_TIMEOUT)
    }
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("cities.db").display());
    let connection = SeaDatabase::connect(url.as_str()).await.unwrap();

    connection
        .execute_unprepared(
            "CREATE TABLE cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                state TEXT NOT NULL
            )",
        )
        .await
        .unwrap();

    TestDb {
        connection: Arc::new(connection),
        _dir: dir,
    }
}
