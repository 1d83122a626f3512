//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod city_repository;
pub(crate) mod entities;

pub use city_repository::{with_deadline, CityRepository, CityStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use city_repository::MockCityRepository;
