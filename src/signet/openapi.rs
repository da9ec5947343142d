use crate::signet::handlers::{
    self,
    health::Health,
    types::{CredentialResponse, ErrorResponse, LoginRequest, SignupRequest},
};
use axum::Json;
use utoipa::OpenApi;

// Title, version, description, contact and license come from Cargo.toml.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::health, handlers::register::register, handlers::login::login),
    components(schemas(Health, SignupRequest, LoginRequest, CredentialResponse, ErrorResponse)),
    tags(
        (name = "credentials", description = "Registration and login"),
        (name = "health", description = "Liveness and build information"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

// axum handler serving the generated document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
