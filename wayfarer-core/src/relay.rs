use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use wayfarer_shared::{MailRequest, RelayFailure, RelaySuccess};

use crate::dispatch::{DispatchError, MailRelay};

/// [`MailRelay`] over the relay service's `POST /sendmail` endpoint
#[derive(Clone)]
pub struct HttpMailRelay {
    http: Client,
    base_url: String,
}

impl HttpMailRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/sendmail", self.base_url)
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn submit(&self, request: &MailRequest) -> Result<(), DispatchError> {
        let res = self
            .http
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        match res.status() {
            StatusCode::OK => {
                let body: RelaySuccess = res
                    .json()
                    .await
                    .map_err(|e| DispatchError::MalformedResponse(e.to_string()))?;
                if body.success {
                    Ok(())
                } else {
                    Err(DispatchError::MalformedResponse(
                        "relay reported success: false".to_string(),
                    ))
                }
            }
            StatusCode::UNAUTHORIZED => {
                let text = res.text().await.unwrap_or_default();
                Err(DispatchError::Rejected {
                    info: rejection_info(&text),
                })
            }
            other => Err(DispatchError::UnexpectedStatus(other.as_u16())),
        }
    }
}

/// Detail from a 401 body: the `err` field when the body is the relay's
/// JSON, the raw text otherwise
fn rejection_info(text: &str) -> String {
    match serde_json::from_str::<RelayFailure>(text) {
        Ok(RelayFailure {
            err: serde_json::Value::String(s),
        }) => s,
        Ok(RelayFailure { err }) => err.to_string(),
        Err(_) => text.trim().to_string(),
    }
}
