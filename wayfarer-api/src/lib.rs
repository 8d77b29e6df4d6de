use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod error;
pub mod mailer;
pub mod sendmail;
pub mod state;

pub use state::AppState;

/// Relay router. `CorsLayer` answers every OPTIONS request itself (200,
/// empty body), so no route handles OPTIONS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::PUT,
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-parse-application-id"),
            HeaderName::from_static("x-parse-rest-api-key"),
            HeaderName::from_static("x-parse-session-token"),
        ]);

    Router::new()
        .route("/healthz", get(healthz))
        .merge(sendmail::routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
