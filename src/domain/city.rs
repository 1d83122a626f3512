//! City domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// City domain entity
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct City {
    /// Store-assigned identifier
    #[validate(range(min = 1, message = "must be a positive integer"))]
    #[schema(example = 1)]
    pub id: i64,
    /// City name
    #[validate(length(min = 1, message = "must be provided"))]
    #[schema(example = "Austin")]
    pub name: String,
    /// State the city belongs to
    #[validate(length(min = 1, message = "must be provided"))]
    #[schema(example = "TX")]
    pub state: String,
}

/// A city that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct NewCity {
    /// City name
    #[validate(length(min = 1, message = "must be provided"))]
    #[schema(example = "Austin")]
    pub name: String,
    /// State the city belongs to
    #[validate(length(min = 1, message = "must be provided"))]
    #[schema(example = "TX")]
    pub state: String,
}

impl NewCity {
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
        }
    }

    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: i64) -> City {
        City {
            id,
            name: self.name,
            state: self.state,
        }
    }
}
