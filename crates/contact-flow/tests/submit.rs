use std::sync::Mutex;

use async_trait::async_trait;
use contact_flow::{
    ContactRecord, Field, Phase, Reason, SubmissionGateway, SubmissionOutcome, WizardController,
};

/// Gateway double that replays a scripted outcome and records what it saw.
struct ScriptedGateway {
    outcome: SubmissionOutcome,
    calls: Mutex<usize>,
    seen: Mutex<Option<ContactRecord>>,
}

impl ScriptedGateway {
    fn success(message_id: &str) -> Self {
        Self::new(SubmissionOutcome::Success {
            message_id: message_id.into(),
        })
    }

    fn failure(reason: &str) -> Self {
        Self::new(SubmissionOutcome::Failure {
            reason: reason.into(),
        })
    }

    fn new(outcome: SubmissionOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(0),
            seen: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl SubmissionGateway for ScriptedGateway {
    async fn submit(&self, record: &ContactRecord) -> SubmissionOutcome {
        *self.calls.lock().expect("calls lock") += 1;
        *self.seen.lock().expect("seen lock") = Some(record.clone());
        self.outcome.clone()
    }
}

fn ada_wizard() -> WizardController {
    let mut wizard = WizardController::new();
    wizard.edit_field(Field::Name, "Ada");
    wizard.advance().expect("name step should pass");
    wizard.edit_field(Field::Email, "ada@example.com");
    wizard.advance().expect("email step should pass");
    let ticket = wizard
        .select_reason(Reason::Collaboration)
        .expect("on reason step");
    assert!(wizard.fire_auto_advance(ticket));
    wizard.edit_field(Field::Message, "Let's build something great together");
    wizard
}

#[tokio::test]
async fn delivered_submission_ends_in_success() {
    let mut wizard = ada_wizard();
    let gateway = ScriptedGateway::success("MSG-123");

    wizard.submit(&gateway).await.expect("record is submittable");
    assert_eq!(
        wizard.phase(),
        &Phase::Success {
            name: "Ada".into(),
            message_id: "MSG-123".into(),
        }
    );
    assert_eq!(gateway.calls(), 1);
    let seen = gateway.seen.lock().expect("seen lock").clone().expect("record seen");
    assert_eq!(seen.name, "Ada");
    assert_eq!(seen.email, "ada@example.com");
    assert_eq!(seen.reason, Some(Reason::Collaboration));
}

#[tokio::test]
async fn invalid_record_never_reaches_the_gateway() {
    let mut wizard = ada_wizard();
    // Edits stay legal on any form step; break an earlier field from step 4.
    wizard.edit_field(Field::Name, "A");
    let gateway = ScriptedGateway::success("MSG-123");

    let rejected = wizard.submit(&gateway).await.expect_err("name is too short");
    assert!(rejected.report.error_for(Field::Name).is_some());
    assert_eq!(wizard.step(), Some(Field::Message));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn short_message_rejection_reports_the_missing_count() {
    let mut wizard = ada_wizard();
    wizard.edit_field(Field::Message, "too short");
    let gateway = ScriptedGateway::success("MSG-123");

    let rejected = wizard.submit(&gateway).await.expect_err("9 characters");
    let error = rejected
        .report
        .error_for(Field::Message)
        .expect("message error");
    assert!(error.message.ends_with("1 more character"));
    assert_eq!(wizard.step(), Some(Field::Message));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn submit_outside_the_final_step_is_inert() {
    let mut wizard = WizardController::new();
    wizard.edit_field(Field::Name, "Ada");
    let gateway = ScriptedGateway::success("MSG-123");

    wizard.submit(&gateway).await.expect("no-op submit");
    assert_eq!(wizard.phase(), &Phase::Form(Field::Name));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn gateway_failure_carries_its_reason_into_the_error_phase() {
    let mut wizard = ada_wizard();
    let gateway = ScriptedGateway::failure("server overloaded");

    wizard.submit(&gateway).await.expect("record is submittable");
    assert_eq!(
        wizard.phase(),
        &Phase::Error {
            reason: "server overloaded".into(),
        }
    );
}

#[tokio::test]
async fn retry_returns_to_the_final_step_with_the_record_intact() {
    let mut wizard = ada_wizard();
    let before = wizard.record().clone();
    let gateway = ScriptedGateway::failure("server overloaded");
    wizard.submit(&gateway).await.expect("record is submittable");

    wizard.retry();
    assert_eq!(wizard.step(), Some(Field::Message));
    assert_eq!(wizard.record(), &before);

    // Retry never resubmits on its own.
    assert_eq!(gateway.calls(), 1);
    let success = ScriptedGateway::success("MSG-456");
    wizard.submit(&success).await.expect("second attempt");
    assert!(matches!(wizard.phase(), Phase::Success { .. }));
}

#[tokio::test]
async fn close_from_error_resets_the_wizard() {
    let mut wizard = ada_wizard();
    let gateway = ScriptedGateway::failure("boom");
    wizard.submit(&gateway).await.expect("record is submittable");

    wizard.close();
    assert_eq!(wizard.phase(), &Phase::Form(Field::Name));
    assert!(wizard.record().is_empty());
}

#[tokio::test]
async fn close_from_success_resets_the_wizard() {
    let mut wizard = ada_wizard();
    let gateway = ScriptedGateway::success("MSG-123");
    wizard.submit(&gateway).await.expect("record is submittable");

    wizard.close();
    assert_eq!(wizard.phase(), &Phase::Form(Field::Name));
    assert!(wizard.record().is_empty());
}

#[tokio::test]
async fn retry_outside_the_error_phase_is_inert() {
    let mut wizard = ada_wizard();
    wizard.retry();
    assert_eq!(wizard.step(), Some(Field::Message));

    let gateway = ScriptedGateway::success("MSG-123");
    wizard.submit(&gateway).await.expect("record is submittable");
    wizard.retry();
    assert!(matches!(wizard.phase(), Phase::Success { .. }));
}
