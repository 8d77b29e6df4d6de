pub mod wizard;
pub mod message;
pub mod dispatch;
pub mod relay;
pub mod session;

pub use dispatch::{DispatchConfig, DispatchError, DispatchReceipt, DispatchState, MailDispatchClient, MailRelay};
pub use message::{compose, compose_for};
pub use relay::HttpMailRelay;
pub use session::BookingSession;
pub use wizard::{ReturnDatePolicy, StepTab, Wizard, WizardError, WizardSnapshot, WizardState, WizardStep};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Traveller record incomplete: missing {0}")]
    IncompleteRecord(&'static str),
    #[error("Booking not complete: wizard is on {0}")]
    NotComplete(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type CoreResult<T> = Result<T, CoreError>;
