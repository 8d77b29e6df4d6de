use wayfarer_shared::TravellerRecord;

use crate::dispatch::{DispatchReceipt, MailDispatchClient, MailRelay};
use crate::message::compose_for;
use crate::wizard::{ReturnDatePolicy, Wizard, WizardStep};
use crate::{CoreError, CoreResult};

/// One traveller's pass through the booking wizard.
///
/// Owns the record and hands it to the wizard on each transition.
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    record: TravellerRecord,
    wizard: Wizard,
}

impl BookingSession {
    pub fn new(policy: ReturnDatePolicy) -> Self {
        Self {
            record: TravellerRecord::new(),
            wizard: Wizard::new(policy),
        }
    }

    pub fn record(&self) -> &TravellerRecord {
        &self.record
    }

    /// Data entry for the current step
    pub fn record_mut(&mut self) -> &mut TravellerRecord {
        &mut self.record
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn start(&mut self) {
        self.wizard.start();
    }

    pub fn advance_to(&mut self, index: usize) -> CoreResult<WizardStep> {
        Ok(self.wizard.advance_to(index, &mut self.record)?)
    }

    pub fn confirmation_message(&self) -> CoreResult<String> {
        compose_for(&self.record)
    }

    /// Mail the confirmation to the traveller once the last step is reached
    pub async fn dispatch_confirmation<R: MailRelay>(
        &self,
        client: &MailDispatchClient<R>,
    ) -> CoreResult<DispatchReceipt> {
        if !self.wizard.is_complete() {
            return Err(CoreError::NotComplete(
                self.wizard.active_step().label().to_string(),
            ));
        }
        if self.record.email.trim().is_empty() {
            return Err(CoreError::IncompleteRecord("email"));
        }

        let body = self.confirmation_message()?;
        Ok(client.send(&self.record.email, &body).await?)
    }
}
