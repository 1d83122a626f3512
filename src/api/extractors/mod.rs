//! Custom request extractors with `AppError` rejections.

mod query_params;
mod validated_json;

pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
