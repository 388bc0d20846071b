#![allow(missing_docs)]

pub mod outcome;
pub mod reason;
pub mod record;
pub mod validate;
pub mod view;
pub mod wizard;

pub use outcome::{GENERIC_FAILURE, SubmissionGateway, SubmissionOutcome};
pub use reason::{REASONS, Reason, ReasonInfo};
pub use record::{ContactRecord, Field};
pub use validate::{
    FieldError, MESSAGE_MAX, MESSAGE_MIN, NAME_MIN, ValidationReport, validate_field,
    validate_record,
};
pub use view::{
    CONTACT_CHANNELS, ContactChannel, ErrorView, RecoveryAction, StepView, SuccessView,
    WizardView, build_view, render_json, render_text,
};
pub use wizard::{AUTO_ADVANCE_DELAY, AdvanceTicket, Phase, SubmitRejected, WizardController};
