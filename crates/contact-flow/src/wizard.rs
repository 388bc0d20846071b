use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::outcome::{SubmissionGateway, SubmissionOutcome};
use crate::reason::Reason;
use crate::record::{ContactRecord, Field};
use crate::validate::{self, FieldError, MESSAGE_MAX, ValidationReport};

/// Delay between a reason selection and the deferred advance.
///
/// The controller never suspends, so the driver owns the actual sleep and
/// fires the ticket afterwards.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// Lifecycle phase of the wizard. Exactly one is active at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Collecting input; the field identifies the active step.
    Form(Field),
    /// A submission attempt is in flight; submit signals are inert.
    Submitting,
    Success {
        name: String,
        message_id: String,
    },
    Error {
        reason: String,
    },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Form(Field::Name)
    }
}

/// Handle for the advance deferred by a reason selection.
///
/// Tickets are generation-counted: any edit, navigation, or reset that
/// happens before the ticket fires invalidates it, so a stale timer cannot
/// push the wizard forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
}

/// Submit attempt rejected before reaching the gateway.
#[derive(Debug, Clone, Error)]
#[error("record failed validation")]
pub struct SubmitRejected {
    pub report: ValidationReport,
}

/// Owns the in-progress [`ContactRecord`] and the wizard lifecycle.
///
/// An owned value with explicit construction and reset; nothing here is
/// global. Views receive read-only snapshots and hand intents back through
/// the operations below.
#[derive(Debug, Default)]
pub struct WizardController {
    phase: Phase,
    record: ContactRecord,
    step_error: Option<FieldError>,
    generation: u64,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn record(&self) -> &ContactRecord {
        &self.record
    }

    /// Active step while collecting input, `None` otherwise.
    pub fn step(&self) -> Option<Field> {
        match self.phase {
            Phase::Form(step) => Some(step),
            _ => None,
        }
    }

    /// Error surfaced by the last rejected advance or submit, if any.
    pub fn step_error(&self) -> Option<&FieldError> {
        self.step_error.as_ref()
    }

    /// Applies a field edit.
    ///
    /// Accepted in any form step so moving backward never loses values;
    /// ignored while submitting and in terminal phases. The message body is
    /// clamped to [`MESSAGE_MAX`] characters at input time. Edits clear the
    /// pending step error and invalidate outstanding advance tickets.
    pub fn edit_field(&mut self, field: Field, value: &str) {
        if !matches!(self.phase, Phase::Form(_)) {
            return;
        }
        self.step_error = None;
        self.generation += 1;
        match field {
            Field::Name => self.record.name = value.to_string(),
            Field::Email => self.record.email = value.to_string(),
            Field::Reason => self.record.reason = Reason::from_id(value.trim()),
            Field::Message => self.record.message = clamp_message(value),
        }
    }

    /// Validates the current step's field and moves forward on success.
    ///
    /// On failure the step is unchanged and the error stays readable via
    /// [`step_error`](Self::step_error) until the next edit. Advancing from
    /// the final step validates but stays put; `submit` gates that exit.
    pub fn advance(&mut self) -> Result<(), FieldError> {
        let Phase::Form(step) = self.phase else {
            return Ok(());
        };
        if let Err(error) = validate::validate_field(step, self.record.field_text(step)) {
            debug!(step = step.id(), code = error.code, "advance rejected");
            self.step_error = Some(error.clone());
            return Err(error);
        }
        self.step_error = None;
        self.generation += 1;
        if let Some(next) = step.next() {
            debug!(from = step.id(), to = next.id(), "step advanced");
            self.phase = Phase::Form(next);
        }
        Ok(())
    }

    /// Moves one step back. Never validated, never loses entered values.
    pub fn retreat(&mut self) {
        let Phase::Form(step) = self.phase else {
            return;
        };
        if let Some(previous) = step.previous() {
            debug!(from = step.id(), to = previous.id(), "step retreated");
            self.step_error = None;
            self.generation += 1;
            self.phase = Phase::Form(previous);
        }
    }

    /// Records a reason selection and mints the deferred-advance ticket.
    ///
    /// Selection and confirmation are merged on this step: instead of an
    /// explicit confirmation signal, the driver schedules
    /// [`fire_auto_advance`](Self::fire_auto_advance) after
    /// [`AUTO_ADVANCE_DELAY`]. Returns `None` outside the reason step.
    pub fn select_reason(&mut self, reason: Reason) -> Option<AdvanceTicket> {
        if self.phase != Phase::Form(Field::Reason) {
            return None;
        }
        self.record.reason = Some(reason);
        self.step_error = None;
        self.generation += 1;
        Some(AdvanceTicket {
            generation: self.generation,
        })
    }

    /// Performs the advance deferred by a reason selection.
    ///
    /// A ticket that outlived an edit, a retreat, or a reset is stale and is
    /// dropped without firing. Returns whether the wizard moved.
    pub fn fire_auto_advance(&mut self, ticket: AdvanceTicket) -> bool {
        if ticket.generation != self.generation || self.phase != Phase::Form(Field::Reason) {
            debug!("stale advance ticket dropped");
            return false;
        }
        self.advance().is_ok()
    }

    /// Validates the whole record and performs the one submission attempt.
    ///
    /// Only `Form(Message)` accepts the signal; in every other phase,
    /// `Submitting` included, it is a no-op rather than queued. Validation
    /// covers all four fields, so the gateway is never invoked with a record
    /// that is not submittable.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<&Phase, SubmitRejected>
    where
        G: SubmissionGateway + ?Sized,
    {
        if self.phase != Phase::Form(Field::Message) {
            return Ok(&self.phase);
        }
        let report = validate::validate_record(&self.record);
        if !report.valid() {
            debug!(failures = report.errors.len(), "submit rejected");
            self.step_error = report
                .error_for(Field::Message)
                .or_else(|| report.errors.first())
                .cloned();
            return Err(SubmitRejected { report });
        }
        self.step_error = None;
        self.generation += 1;
        self.phase = Phase::Submitting;
        debug!("submitting contact record");
        self.phase = match gateway.submit(&self.record).await {
            SubmissionOutcome::Success { message_id } => Phase::Success {
                name: self.record.name.clone(),
                message_id,
            },
            SubmissionOutcome::Failure { reason } => Phase::Error { reason },
        };
        Ok(&self.phase)
    }

    /// Returns from the error screen to the final form step.
    ///
    /// The record is left untouched so the user can resubmit without
    /// retyping; resubmission itself stays explicit.
    pub fn retry(&mut self) {
        if matches!(self.phase, Phase::Error { .. }) {
            debug!("retrying after failed submission");
            self.phase = Phase::Form(Field::Message);
            self.generation += 1;
        }
    }

    /// Leaves a terminal phase through a full reset.
    pub fn close(&mut self) {
        if matches!(self.phase, Phase::Success { .. } | Phase::Error { .. }) {
            self.reset();
        }
    }

    /// Restores the initial state: first step, empty record, outcome gone.
    pub fn reset(&mut self) {
        debug!("wizard reset");
        self.phase = Phase::Form(Field::Name);
        self.record = ContactRecord::default();
        self.step_error = None;
        self.generation += 1;
    }
}

fn clamp_message(value: &str) -> String {
    if value.chars().count() <= MESSAGE_MAX {
        value.to_string()
    } else {
        value.chars().take(MESSAGE_MAX).collect()
    }
}
