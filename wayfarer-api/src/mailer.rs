use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use wayfarer_shared::{MailRequest, Secret};

use crate::app_config::{MailConfig, ProviderKind};

/// Third-party service that actually delivers the mail
#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send_mail(&self, message: &MailRequest) -> Result<(), ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("No recipients defined")]
    MissingRecipient,

    #[error("No sender defined")]
    MissingSender,

    #[error("Provider answered {status}")]
    Rejected { status: u16, body: Value },

    #[error("Provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider misconfigured: {0}")]
    Misconfigured(String),
}

impl ProviderError {
    /// Detail returned to the caller as the relay's `err` field
    pub fn info(&self) -> Value {
        match self {
            ProviderError::Rejected { status, body } => json!({
                "status": status,
                "response": body,
            }),
            other => Value::String(other.to_string()),
        }
    }
}

/// SendGrid v3 `mail/send`
pub struct SendGridProvider {
    http: Client,
    api_key: Secret<String>,
    endpoint: String,
}

impl SendGridProvider {
    pub fn new(api_key: Secret<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    fn payload(message: &MailRequest) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.text }],
        })
    }
}

#[async_trait]
impl MailProvider for SendGridProvider {
    async fn send_mail(&self, message: &MailRequest) -> Result<(), ProviderError> {
        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&Self::payload(message))
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        Err(ProviderError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Accepts everything and writes it to the log; for local development
pub struct LogProvider;

#[async_trait]
impl MailProvider for LogProvider {
    async fn send_mail(&self, message: &MailRequest) -> Result<(), ProviderError> {
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Mail accepted (log provider):\n{}",
            message.text
        );
        Ok(())
    }
}

pub fn build_provider(config: &MailConfig) -> Result<Box<dyn MailProvider>, ProviderError> {
    match config.provider {
        ProviderKind::Log => Ok(Box::new(LogProvider)),
        ProviderKind::SendGrid => {
            let key = config.sendgrid_api_key.clone().ok_or_else(|| {
                ProviderError::Misconfigured("mail.sendgrid_api_key is not set".to_string())
            })?;
            Ok(Box::new(SendGridProvider::new(key, &config.sendgrid_endpoint)))
        }
    }
}
