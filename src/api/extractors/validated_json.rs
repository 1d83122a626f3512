//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Undecodable bodies become [`AppError::BadRequest`]; rule violations
/// become [`AppError::ValidationFailed`] with every failing field.
///
/// # Example
///
/// ```rust,ignore
/// use city_api::api::extractors::ValidatedJson;
/// use city_api::domain::NewCity;
///
/// async fn create_city(ValidatedJson(payload): ValidatedJson<NewCity>) {
///     // payload.name and payload.state are non-empty
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
