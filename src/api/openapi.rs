//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::city_handler;
use crate::domain::{City, NewCity};
use crate::types::Metadata;

/// OpenAPI documentation for the City API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "City API",
        version = "0.1.0",
        description = "Create, update, delete and page through cities",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        city_handler::create_city,
        city_handler::update_city,
        city_handler::delete_city,
        city_handler::list_cities,
    ),
    components(
        schemas(
            City,
            NewCity,
            Metadata,
            city_handler::CityListResponse,
        )
    ),
    tags(
        (name = "Cities", description = "City management operations")
    )
)]
pub struct ApiDoc;
