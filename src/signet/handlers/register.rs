use super::{
    types::{CredentialResponse, ErrorResponse, SignupRequest},
    INTERNAL_ERROR, INVALID_JSON,
};
use crate::credentials::{RegistrationOutcome, RegistrationService, RegistrationStatus};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/api/signup",
    request_body = SignupRequest,
    responses (
        (status = 201, description = "User signed up", body = CredentialResponse, content_type = "application/json"),
        (status = 400, description = "Missing or too short fields, or invalid JSON", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag= "credentials"
)]
// axum handler for signup
#[instrument(skip(registration, payload))]
pub async fn register(
    registration: Extension<Arc<RegistrationService>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response {
    let request: SignupRequest = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("signup payload rejected: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(INVALID_JSON))).into_response();
        }
    };

    let username = request.username.unwrap_or_default();
    debug!(%username, "signup request");

    let password = SecretString::from(request.password.unwrap_or_default());
    let result = registration
        .register(&username, &password, &request.phone.unwrap_or_default())
        .await;

    response(RegistrationOutcome::from(result))
}

fn response(outcome: RegistrationOutcome) -> Response {
    match (outcome.status, outcome.display_username) {
        (RegistrationStatus::Created, Some(username)) => (
            StatusCode::CREATED,
            Json(CredentialResponse {
                message: "User signed up successfully!".to_string(),
                username,
            }),
        )
            .into_response(),
        (RegistrationStatus::Conflict, _) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Username already exists")),
        )
            .into_response(),
        (RegistrationStatus::BadRequest, _) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(outcome.detail.unwrap_or_default())),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(INTERNAL_ERROR)),
        )
            .into_response(),
    }
}
