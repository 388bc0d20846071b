use serde_json::{Value, json};

use crate::reason::{REASONS, ReasonInfo};
use crate::record::Field;
use crate::wizard::{Phase, WizardController};

/// Recovery intents a terminal view may hand back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    SendAnother,
    Retry,
    Close,
}

impl RecoveryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryAction::SendAnother => "send_another",
            RecoveryAction::Retry => "retry",
            RecoveryAction::Close => "close",
        }
    }
}

/// Display-only fallback channel shown on the error screen. Informational
/// reference data; not part of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactChannel {
    pub kind: &'static str,
    pub value: &'static str,
}

pub const CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel {
        kind: "email",
        value: "hello@example.dev",
    },
    ContactChannel {
        kind: "phone",
        value: "+1 (555) 010-3986",
    },
];

const SUCCESS_ACTIONS: &[RecoveryAction] = &[RecoveryAction::SendAnother];
const ERROR_ACTIONS: &[RecoveryAction] = &[RecoveryAction::Retry, RecoveryAction::Close];

/// Snapshot of one form step for any frontend.
#[derive(Debug, Clone)]
pub struct StepView {
    pub step: Field,
    pub number: usize,
    pub total: usize,
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub error: Option<String>,
    /// Choice metadata, present on the reason step only.
    pub reasons: Option<&'static [ReasonInfo]>,
}

/// Terminal screen shown once the endpoint accepted the message.
#[derive(Debug, Clone)]
pub struct SuccessView {
    pub name: String,
    pub message_id: String,
    pub actions: &'static [RecoveryAction],
}

/// Terminal screen shown after a failed submission attempt.
#[derive(Debug, Clone)]
pub struct ErrorView {
    pub message: String,
    pub channels: &'static [ContactChannel],
    pub actions: &'static [RecoveryAction],
}

/// Read-only presentation of the controller's current phase.
#[derive(Debug, Clone)]
pub enum WizardView {
    Step(StepView),
    Pending,
    Success(SuccessView),
    Error(ErrorView),
}

/// Builds the view for the controller's current phase.
pub fn build_view(controller: &WizardController) -> WizardView {
    match controller.phase() {
        Phase::Form(step) => WizardView::Step(step_view(controller, *step)),
        Phase::Submitting => WizardView::Pending,
        Phase::Success { name, message_id } => WizardView::Success(SuccessView {
            name: name.clone(),
            message_id: message_id.clone(),
            actions: SUCCESS_ACTIONS,
        }),
        Phase::Error { reason } => WizardView::Error(ErrorView {
            message: reason.clone(),
            channels: CONTACT_CHANNELS,
            actions: ERROR_ACTIONS,
        }),
    }
}

fn step_view(controller: &WizardController, step: Field) -> StepView {
    StepView {
        step,
        number: step.step_number(),
        total: Field::ORDER.len(),
        label: step.label(),
        hint: step_hint(step),
        value: controller.record().field_text(step).to_string(),
        error: controller
            .step_error()
            .map(|error| error.message.clone()),
        reasons: matches!(step, Field::Reason).then_some(REASONS),
    }
}

fn step_hint(step: Field) -> &'static str {
    match step {
        Field::Name => "What should I call you?",
        Field::Email => "Where can I reach you back?",
        Field::Reason => "What brings you here?",
        Field::Message => "Between 10 and 1000 characters",
    }
}

/// Renders a view as human-friendly terminal text.
pub fn render_text(view: &WizardView) -> String {
    let mut lines = Vec::new();
    match view {
        WizardView::Step(step) => {
            lines.push(format!(
                "Step {}/{}: {}",
                step.number, step.total, step.label
            ));
            lines.push(format!("  {}", step.hint));
            if !step.value.is_empty() {
                lines.push(format!("  Current: {}", step.value));
            }
            if let Some(reasons) = step.reasons {
                for (idx, info) in reasons.iter().enumerate() {
                    lines.push(format!(
                        "  {}. {} ({}) - {}",
                        idx + 1,
                        info.label,
                        info.id,
                        info.description
                    ));
                }
            }
            if let Some(error) = &step.error {
                lines.push(format!("  ! {}", error));
            }
        }
        WizardView::Pending => {
            lines.push("Sending your message...".to_string());
        }
        WizardView::Success(success) => {
            lines.push(format!("Thanks {}, your message is on its way!", success.name));
            lines.push(format!("  Delivery id: {}", success.message_id));
            lines.push(actions_line(success.actions));
        }
        WizardView::Error(error) => {
            lines.push(format!("Sending failed: {}", error.message));
            lines.push("You can also reach me directly:".to_string());
            for channel in error.channels {
                lines.push(format!("  {}: {}", channel.kind, channel.value));
            }
            lines.push(actions_line(error.actions));
        }
    }
    lines.join("\n")
}

/// Renders a view as a structured JSON-friendly value.
pub fn render_json(view: &WizardView) -> Value {
    match view {
        WizardView::Step(step) => json!({
            "status": "form",
            "step": step.step.id(),
            "progress": { "number": step.number, "total": step.total },
            "label": step.label,
            "hint": step.hint,
            "value": step.value,
            "error": step.error,
            "reasons": step.reasons.map(|reasons| {
                reasons
                    .iter()
                    .map(|info| {
                        json!({
                            "id": info.id,
                            "label": info.label,
                            "icon": info.icon,
                            "description": info.description,
                        })
                    })
                    .collect::<Vec<_>>()
            }),
        }),
        WizardView::Pending => json!({ "status": "submitting" }),
        WizardView::Success(success) => json!({
            "status": "success",
            "name": success.name,
            "message_id": success.message_id,
            "actions": action_ids(success.actions),
        }),
        WizardView::Error(error) => json!({
            "status": "error",
            "message": error.message,
            "channels": error.channels.iter().map(|channel| {
                json!({ "kind": channel.kind, "value": channel.value })
            }).collect::<Vec<_>>(),
            "actions": action_ids(error.actions),
        }),
    }
}

fn actions_line(actions: &[RecoveryAction]) -> String {
    let ids = actions
        .iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("  Actions: {}", ids)
}

fn action_ids(actions: &[RecoveryAction]) -> Vec<&'static str> {
    actions.iter().map(|action| action.as_str()).collect()
}
