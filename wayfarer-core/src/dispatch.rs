use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;
use wayfarer_shared::MailRequest;

pub const SENT_MESSAGE: &str = "Email sent successfully";
const SENDING_MESSAGE: &str = "Sending email...";

/// Something that can hand a message to the mail relay
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn submit(&self, request: &MailRequest) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("A send is already in progress")]
    Busy,

    #[error("Mail provider rejected the message: {info}")]
    Rejected { info: String },

    #[error("Mail relay answered with unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Mail relay unreachable: {0}")]
    Transport(String),

    #[error("Mail relay sent an unreadable response: {0}")]
    MalformedResponse(String),

    #[error("Mail relay did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Send was cancelled before the relay answered")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub relay_url: String,
    pub sender: String,
    pub subject: String,
    pub timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:8080".to_string(),
            sender: "bookings@dreamy-destination.example".to_string(),
            subject: "Dream Destinations".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Observable progress of the most recent send
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchState {
    pub is_sending: bool,
    pub is_sent: bool,
    pub server_message: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub attempt_id: Uuid,
    pub recipient: String,
}

/// Sends confirmation mail through a [`MailRelay`], one message at a time
pub struct MailDispatchClient<R: MailRelay> {
    relay: R,
    config: DispatchConfig,
    in_flight: AtomicBool,
    state: Mutex<DispatchState>,
}

/// Held for the duration of one send. If the send future is dropped before
/// an outcome is recorded, the state is marked cancelled on the way out.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a Mutex<DispatchState>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Send dropped before the relay answered");
            let mut state = lock(self.state);
            state.is_sending = false;
            state.is_sent = false;
            state.server_message = Some(format!("Email could not be sent: {}", DispatchError::Cancelled));
            state.last_error = Some(DispatchError::Cancelled.to_string());
        }
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn lock(state: &Mutex<DispatchState>) -> MutexGuard<'_, DispatchState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<R: MailRelay> MailDispatchClient<R> {
    pub fn new(relay: R, config: DispatchConfig) -> Self {
        Self {
            relay,
            config,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(DispatchState::default()),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn state(&self) -> DispatchState {
        self.lock_state().clone()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit `body` to `recipient`.
    ///
    /// Rejects with [`DispatchError::Busy`] while another send is pending;
    /// the state is then left untouched. Otherwise the outcome is recorded
    /// exactly once before returning, or as [`DispatchError::Cancelled`] if
    /// the future is dropped while waiting on the relay.
    pub async fn send(&self, recipient: &str, body: &str) -> Result<DispatchReceipt, DispatchError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Send to {} refused: previous send still pending", recipient);
            return Err(DispatchError::Busy);
        }
        let mut guard = InFlight {
            flag: &self.in_flight,
            state: &self.state,
            settled: false,
        };

        let attempt_id = Uuid::new_v4();
        {
            let mut state = self.lock_state();
            state.is_sending = true;
            state.is_sent = false;
            state.server_message = Some(SENDING_MESSAGE.to_string());
            state.last_error = None;
        }

        let request = MailRequest {
            from: self.config.sender.clone(),
            to: recipient.to_string(),
            subject: self.config.subject.clone(),
            text: body.to_string(),
        };

        tracing::info!("Dispatching mail {} to {}", attempt_id, recipient);
        let result = match tokio::time::timeout(self.config.timeout, self.relay.submit(&request)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout(self.config.timeout)),
        };

        let mut state = self.lock_state();
        state.is_sending = false;
        guard.settled = true;
        match result {
            Ok(()) => {
                tracing::info!("Mail {} accepted by relay", attempt_id);
                state.is_sent = true;
                state.server_message = Some(SENT_MESSAGE.to_string());
                Ok(DispatchReceipt {
                    attempt_id,
                    recipient: request.to,
                })
            }
            Err(err) => {
                tracing::error!("Mail {} failed: {}", attempt_id, err);
                state.is_sent = false;
                state.server_message = Some(format!("Email could not be sent: {}", err));
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DispatchState> {
        lock(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Relay stub answering with a fixed result, optionally held until released
    struct StubRelay {
        reply: Result<(), DispatchError>,
        gate: Option<Arc<Notify>>,
        calls: Arc<AtomicUsize>,
        seen: Mutex<Vec<MailRequest>>,
    }

    impl StubRelay {
        fn replying(reply: Result<(), DispatchError>) -> Self {
            Self {
                reply,
                gate: None,
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::replying(Ok(()))
            }
        }
    }

    #[async_trait]
    impl MailRelay for StubRelay {
        async fn submit(&self, request: &MailRequest) -> Result<(), DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    struct SilentRelay;

    #[async_trait]
    impl MailRelay for SilentRelay {
        async fn submit(&self, _request: &MailRequest) -> Result<(), DispatchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_successful_send_marks_sent() {
        let client = MailDispatchClient::new(StubRelay::replying(Ok(())), DispatchConfig::default());

        let receipt = client.send("asha@example.com", "Hello Asha,").await.unwrap();
        assert_eq!(receipt.recipient, "asha@example.com");

        let state = client.state();
        assert!(state.is_sent);
        assert!(!state.is_sending);
        assert_eq!(state.server_message.as_deref(), Some(SENT_MESSAGE));
        assert!(state.last_error.is_none());

        let seen = client.relay.seen.lock().unwrap();
        assert_eq!(seen[0].from, "bookings@dreamy-destination.example");
        assert_eq!(seen[0].subject, "Dream Destinations");
        assert_eq!(seen[0].text, "Hello Asha,");
    }

    #[tokio::test]
    async fn test_rejection_is_a_failure() {
        let relay = StubRelay::replying(Err(DispatchError::Rejected {
            info: "bad key".into(),
        }));
        let client = MailDispatchClient::new(relay, DispatchConfig::default());

        let err = client.send("asha@example.com", "body").await.unwrap_err();
        assert!(matches!(err, DispatchError::Rejected { .. }));

        let state = client.state();
        assert!(!state.is_sent);
        assert!(!state.is_sending);
        assert!(state.last_error.unwrap().contains("bad key"));
        assert_ne!(state.server_message.as_deref(), Some(SENT_MESSAGE));
    }

    #[tokio::test]
    async fn test_retry_after_failure_can_succeed() {
        let client = MailDispatchClient::new(
            StubRelay::replying(Err(DispatchError::Transport("refused".into()))),
            DispatchConfig::default(),
        );
        assert!(client.send("a@example.com", "x").await.is_err());
        assert!(!client.is_sending());
        // The guard is released, so another attempt reaches the relay
        assert!(client.send("a@example.com", "x").await.is_err());
        assert_eq!(client.relay.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unresponsive_relay_times_out() {
        let config = DispatchConfig {
            timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let client = MailDispatchClient::new(SilentRelay, config);

        let err = client.send("a@example.com", "x").await.unwrap_err();
        assert_eq!(err, DispatchError::Timeout(Duration::from_millis(50)));

        let state = client.state();
        assert!(!state.is_sending);
        assert!(!state.is_sent);
    }

    #[tokio::test]
    async fn test_abandoned_send_releases_state() {
        let client = MailDispatchClient::new(SilentRelay, DispatchConfig::default());

        let outer = tokio::time::timeout(
            Duration::from_millis(20),
            client.send("a@example.com", "x"),
        )
        .await;
        assert!(outer.is_err());

        let state = client.state();
        assert!(!client.is_sending());
        assert!(!state.is_sending);
        assert!(!state.is_sent);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Send was cancelled before the relay answered")
        );
        assert_ne!(state.server_message.as_deref(), Some(SENDING_MESSAGE));
    }

    #[tokio::test]
    async fn test_overlapping_send_is_refused() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(MailDispatchClient::new(
            StubRelay::gated(gate.clone()),
            DispatchConfig::default(),
        ));

        let first = {
            let client = client.clone();
            tokio::spawn(async move { client.send("a@example.com", "first").await })
        };

        while !client.state().is_sending {
            tokio::task::yield_now().await;
        }

        let second = client.send("b@example.com", "second").await;
        assert_eq!(second, Err(DispatchError::Busy));
        assert_eq!(
            client.state().server_message.as_deref(),
            Some(SENDING_MESSAGE)
        );

        gate.notify_one();
        let receipt = first.await.unwrap().unwrap();
        assert_eq!(receipt.recipient, "a@example.com");
        assert_eq!(client.relay.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.state().server_message.as_deref(), Some(SENT_MESSAGE));
    }
}
