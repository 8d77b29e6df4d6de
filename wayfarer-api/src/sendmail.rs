use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use wayfarer_shared::{MailRequest, RelaySuccess};
use crate::{error::AppError, mailer::ProviderError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/sendmail", post(send_mail))
}

/// POST /sendmail
/// Forward `{from, to, subject, text}` to the configured mail provider
async fn send_mail(
    State(state): State<AppState>,
    payload: Result<Json<MailRequest>, JsonRejection>,
) -> Result<Json<RelaySuccess>, AppError> {
    let Json(message) = payload?;

    if !message.has_recipient() {
        return Err(ProviderError::MissingRecipient.into());
    }
    if !message.has_sender() {
        return Err(ProviderError::MissingSender.into());
    }

    state.mailer.send_mail(&message).await?;
    tracing::info!("Mail to {} handed to provider", message.to);

    Ok(Json(RelaySuccess { success: true }))
}
