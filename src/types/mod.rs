//! Shared types for list endpoints and responses.

mod pagination;
mod response;

pub use pagination::{calculate_metadata, Filters, ListParams, Metadata, SortDirection};
pub use response::{Created, NoContent};
