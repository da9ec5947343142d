use crate::credentials::{
    Argon2Hasher, AuthenticationService, CredentialHasher, IdentityStore, MemoryStore,
    RegistrationService, WorkFactor,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::{any::Any, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, warn, Span};
use ulid::Ulid;

pub mod handlers;
mod openapi;

pub use openapi::openapi;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

/// Start the server
/// # Errors
/// Return error if the work factor is invalid or the server fails to start
pub async fn new(port: u16, allowed_origin: String, work_factor: WorkFactor) -> Result<()> {
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new(work_factor)?);

    // Identities live in process memory and are gone after a restart.
    let store: Arc<dyn IdentityStore> = Arc::new(MemoryStore::new());
    warn!("Using in-memory identity store, registrations are not persisted");

    let app = router(store, hasher, &allowed_origin)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Gracefully shutdown");
            }
        })
        .await?;

    Ok(())
}

/// Build the application router around a store and hasher.
/// # Errors
/// Return error if `allowed_origin` is not a valid header value
pub fn router(
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
    allowed_origin: &str,
) -> Result<Router> {
    let registration = Arc::new(RegistrationService::new(store.clone(), hasher.clone()));
    let authentication = Arc::new(AuthenticationService::new(store, hasher));

    let app = Router::new()
        .route("/api/signup", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors(allowed_origin)?)
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(Extension(registration))
                .layer(Extension(authentication)),
        );

    Ok(app)
}

fn cors(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(
            HeaderValue::from_str(allowed_origin)
                .with_context(|| format!("Invalid allowed origin: {allowed_origin}"))?,
        )
    };

    Ok(CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_origin(origin))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("request handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(handlers::types::ErrorResponse::new(handlers::INTERNAL_ERROR)),
    )
        .into_response()
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn cors_accepts_wildcard_and_exact_origin() {
        assert!(cors("*").is_ok());
        assert!(cors("https://signet.dev").is_ok());
        assert!(cors("bad\norigin").is_err());
    }

    #[tokio::test]
    async fn panic_becomes_opaque_500() {
        let response = handle_panic(Box::new("store exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        assert_eq!(&bytes[..], br#"{"error":"Internal server error"}"#);
    }
}
