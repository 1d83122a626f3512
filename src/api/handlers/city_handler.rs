//! City handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{QueryParams, ValidatedJson};
use crate::api::AppState;
use crate::config::CITY_SORT_SAFELIST;
use crate::domain::{City, NewCity};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, Filters, ListParams, Metadata, NoContent};

/// One page of cities
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CityListResponse {
    pub metadata: Metadata,
    pub data: Vec<City>,
}

/// Create city routes
pub fn city_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_city))
        .route("/update", put(update_city))
        .route("/delete/:id", delete(delete_city))
        .route("/list", get(list_cities))
}

/// Create a new city
#[utoipa::path(
    post,
    path = "/cities/create",
    tag = "Cities",
    request_body = NewCity,
    responses(
        (status = 201, description = "City created", body = City),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_city(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewCity>,
) -> AppResult<Created<City>> {
    let city = state.cities.insert(payload).await?;
    Ok(Created(city))
}

/// Replace name and state of an existing city
#[utoipa::path(
    put,
    path = "/cities/update",
    tag = "Cities",
    request_body = City,
    responses(
        (status = 200, description = "City updated", body = City),
        (status = 400, description = "Validation error"),
        (status = 409, description = "City no longer exists")
    )
)]
pub async fn update_city(
    State(state): State<AppState>,
    ValidatedJson(city): ValidatedJson<City>,
) -> AppResult<Json<City>> {
    state.cities.update(&city).await?;
    Ok(Json(city))
}

/// Delete a city
#[utoipa::path(
    delete,
    path = "/cities/delete/{id}",
    tag = "Cities",
    params(("id" = i64, Path, description = "City ID")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "City not found")
    )
)]
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::bad_request("id must be an integer"))?;

    state.cities.delete(id).await?;
    Ok(NoContent)
}

/// List cities page by page
#[utoipa::path(
    get,
    path = "/cities/list",
    tag = "Cities",
    params(ListParams),
    responses(
        (status = 200, description = "Page of cities", body = CityListResponse),
        (status = 400, description = "Invalid paging or sort parameters")
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<CityListResponse>> {
    let filters = Filters::new(params, CITY_SORT_SAFELIST);
    filters.validate()?;

    let (data, metadata) = state.cities.list(&filters).await?;
    Ok(Json(CityListResponse { metadata, data }))
}
