use std::sync::Arc;
use crate::mailer::MailProvider;

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn MailProvider>,
}

impl AppState {
    pub fn new(mailer: Arc<dyn MailProvider>) -> Self {
        Self { mailer }
    }
}
