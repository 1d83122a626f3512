//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over the `cities` table

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{CityRepository, CityStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockCityRepository;
