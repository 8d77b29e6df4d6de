use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use crate::mailer::ProviderError;

#[derive(Debug)]
pub enum AppError {
    /// Delivery failed; reported as 401 with the provider's detail under `err`
    MailRejected(ProviderError),
    ValidationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MailRejected(err) => {
                tracing::warn!("Mail provider failure: {}", err);
                (StatusCode::UNAUTHORIZED, Json(json!({ "err": err.info() }))).into_response()
            }
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Self::MailRejected(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}
