//! The booking-side dispatch client talking to a live relay over HTTP.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use wayfarer_api::{
    app,
    mailer::{MailProvider, ProviderError},
    AppState,
};
use wayfarer_core::{
    BookingSession, CoreError, DispatchConfig, DispatchError, HttpMailRelay, MailDispatchClient,
};
use wayfarer_shared::{LocationCatalog, MailRequest};

struct FixedProvider {
    accept: bool,
}

#[async_trait]
impl MailProvider for FixedProvider {
    async fn send_mail(&self, _message: &MailRequest) -> Result<(), ProviderError> {
        if self.accept {
            Ok(())
        } else {
            Err(ProviderError::Rejected {
                status: 401,
                body: json!({ "message": "bad key" }),
            })
        }
    }
}

async fn spawn_relay(accept: bool) -> String {
    let router = app(AppState::new(Arc::new(FixedProvider { accept })));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

fn completed_session() -> BookingSession {
    let mut session = BookingSession::default();
    let record = session.record_mut();
    record.first_name = "Asha".into();
    record.email = "asha@example.com".into();
    record.location = LocationCatalog::default().find_city("Pune").cloned();
    record.departure_date = NaiveDate::from_ymd_opt(2020, 6, 22);

    session.advance_to(0).unwrap();
    session.advance_to(1).unwrap();
    session.advance_to(2).unwrap();
    session
}

#[tokio::test]
async fn accepted_mail_marks_booking_sent() {
    let url = spawn_relay(true).await;
    let client = MailDispatchClient::new(HttpMailRelay::new(url), DispatchConfig::default());

    let receipt = completed_session()
        .dispatch_confirmation(&client)
        .await
        .expect("dispatch");
    assert_eq!(receipt.recipient, "asha@example.com");

    let state = client.state();
    assert!(state.is_sent);
    assert!(!state.is_sending);
    assert_eq!(state.server_message.as_deref(), Some("Email sent successfully"));
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn rejected_mail_is_a_failure_not_a_success() {
    let url = spawn_relay(false).await;
    let client = MailDispatchClient::new(HttpMailRelay::new(url), DispatchConfig::default());

    let err = completed_session()
        .dispatch_confirmation(&client)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Dispatch(DispatchError::Rejected { ref info }) if info.contains("bad key")
    ));

    let state = client.state();
    assert!(!state.is_sent);
    assert!(!state.is_sending);
    assert!(state.last_error.is_some());
}
