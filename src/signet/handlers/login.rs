use super::{
    types::{CredentialResponse, ErrorResponse, LoginRequest},
    INTERNAL_ERROR, INVALID_JSON,
};
use crate::credentials::{AuthenticationOutcome, AuthenticationService, AuthenticationStatus};
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
    path= "/api/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = CredentialResponse, content_type = "application/json"),
        (status = 400, description = "Missing fields or invalid JSON", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag= "credentials"
)]
#[instrument(skip(authentication, payload))]
pub async fn login(
    authentication: Extension<Arc<AuthenticationService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request: LoginRequest = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("login payload rejected: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(INVALID_JSON))).into_response();
        }
    };

    let password = SecretString::from(request.password.unwrap_or_default());
    let result = authentication
        .authenticate(&request.username.unwrap_or_default(), &password)
        .await;

    response(AuthenticationOutcome::from(result))
}

fn response(outcome: AuthenticationOutcome) -> Response {
    match (outcome.status, outcome.display_username) {
        (AuthenticationStatus::Ok, Some(username)) => (
            StatusCode::OK,
            Json(CredentialResponse {
                message: "Login successful!".to_string(),
                username,
            }),
        )
            .into_response(),
        (AuthenticationStatus::Unauthorized, _) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid username or password")),
        )
            .into_response(),
        (AuthenticationStatus::BadRequest, _) => (
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (AuthenticationStatus::Ok, Some("Bob"), StatusCode::OK),
            (AuthenticationStatus::Unauthorized, None, StatusCode::UNAUTHORIZED),
            (AuthenticationStatus::BadRequest, None, StatusCode::BAD_REQUEST),
            (
                AuthenticationStatus::InternalError,
                None,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            // Ok without a name is not a usable success
            (AuthenticationStatus::Ok, None, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (status, display, expected) in cases {
            let response = response(AuthenticationOutcome {
                status,
                display_username: display.map(str::to_string),
                detail: None,
            });
            assert_eq!(response.status(), expected, "{status:?}");
        }
    }
}
