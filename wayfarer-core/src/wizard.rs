use serde::{Deserialize, Serialize};
use wayfarer_shared::TravellerRecord;

/// The three wizard steps, in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Traveller,
    Itinerary,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Traveller,
        WizardStep::Itinerary,
        WizardStep::Confirmation,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Traveller => "STEP 1",
            WizardStep::Itinerary => "STEP 2",
            WizardStep::Confirmation => "STEP 3",
        }
    }
}

/// Whether a return date before the departure date stops the wizard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReturnDatePolicy {
    /// Flag only; the user may continue
    #[default]
    Advisory,
    /// Refuse to enter the confirmation step while flagged
    Blocking,
}

/// Wizard lifecycle. `Complete` is terminal: only `start()` leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    InProgress {
        active: WizardStep,
        furthest: WizardStep,
    },
    Complete,
}

/// Tab view of one step, derived from the state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepTab {
    pub label: String,
    pub enabled: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub active_step_index: usize,
    pub steps: Vec<StepTab>,
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown step index {0}")]
    UnknownStep(usize),

    #[error("Step {target} is locked while on {active}")]
    StepLocked {
        target: &'static str,
        active: &'static str,
    },

    #[error("Booking already confirmed; cannot return to {0}")]
    Completed(&'static str),

    #[error("Return date precedes departure date")]
    ReturnDateInvalid,
}

/// Drives step sequencing and date validation for one booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    state: WizardState,
    policy: ReturnDatePolicy,
}

impl Wizard {
    pub fn new(policy: ReturnDatePolicy) -> Self {
        let mut wizard = Self {
            state: WizardState::Complete,
            policy,
        };
        wizard.start();
        wizard
    }

    /// Reset to the first step regardless of the current state
    pub fn start(&mut self) {
        self.state = WizardState::InProgress {
            active: WizardStep::Traveller,
            furthest: WizardStep::Traveller,
        };
        tracing::debug!("Wizard started at {}", WizardStep::Traveller.label());
    }

    /// Move to the step at `index`.
    ///
    /// Every call re-checks the record's date ordering first, whether or not
    /// the move is then allowed.
    pub fn advance_to(
        &mut self,
        index: usize,
        record: &mut TravellerRecord,
    ) -> Result<WizardStep, WizardError> {
        if record.revalidate_dates() {
            tracing::warn!("Return date precedes departure date");
        }

        let target = WizardStep::from_index(index).ok_or(WizardError::UnknownStep(index))?;

        let (active, furthest) = match self.state {
            WizardState::Complete if target == WizardStep::Confirmation => return Ok(target),
            WizardState::Complete => return Err(WizardError::Completed(target.label())),
            WizardState::InProgress { active, furthest } => (active, furthest),
        };

        if target > furthest && target.index() > active.index() + 1 {
            return Err(WizardError::StepLocked {
                target: target.label(),
                active: active.label(),
            });
        }

        if target == WizardStep::Confirmation
            && record.return_date_invalid
            && self.policy == ReturnDatePolicy::Blocking
        {
            return Err(WizardError::ReturnDateInvalid);
        }

        self.state = if target == WizardStep::Confirmation {
            WizardState::Complete
        } else {
            WizardState::InProgress {
                active: target,
                furthest: furthest.max(target),
            }
        };

        tracing::debug!("Wizard moved {} -> {}", active.label(), target.label());
        Ok(target)
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn policy(&self) -> ReturnDatePolicy {
        self.policy
    }

    pub fn active_step(&self) -> WizardStep {
        match self.state {
            WizardState::InProgress { active, .. } => active,
            WizardState::Complete => WizardStep::Confirmation,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == WizardState::Complete
    }

    pub fn is_enabled(&self, step: WizardStep) -> bool {
        match self.state {
            WizardState::InProgress { furthest, .. } => step <= furthest,
            WizardState::Complete => step == WizardStep::Confirmation,
        }
    }

    pub fn tabs(&self) -> Vec<StepTab> {
        let active = self.active_step();
        WizardStep::ALL
            .iter()
            .map(|&step| StepTab {
                label: step.label().to_string(),
                enabled: self.is_enabled(step),
                is_active: step == active,
            })
            .collect()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            active_step_index: self.active_step().index(),
            steps: self.tabs(),
            is_complete: self.is_complete(),
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(ReturnDatePolicy::default())
    }
}
