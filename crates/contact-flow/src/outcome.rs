use async_trait::async_trait;

use crate::record::ContactRecord;

/// Failure text used whenever the endpoint reports nothing usable.
pub const GENERIC_FAILURE: &str = "failed to send message";

/// Result of one submission attempt. Short-lived: discarded as soon as a new
/// attempt starts or the wizard resets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { message_id: String },
    Failure { reason: String },
}

/// Boundary component performing the one external network call per attempt.
///
/// Implementations must convert every failure mode (non-success statuses,
/// transport errors, malformed responses) into [`SubmissionOutcome::Failure`].
/// The controller matches on the variant only and never handles transport
/// errors itself.
#[async_trait]
pub trait SubmissionGateway {
    async fn submit(&self, record: &ContactRecord) -> SubmissionOutcome;
}
