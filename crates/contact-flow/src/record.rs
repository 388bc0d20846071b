use serde::{Deserialize, Serialize};

use crate::reason::Reason;

/// Ordered form fields; each wizard step owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Reason,
    Message,
}

impl Field {
    /// Fields in step order.
    pub const ORDER: [Field; 4] = [Field::Name, Field::Email, Field::Reason, Field::Message];

    /// One-based step number shown by progress displays.
    pub fn step_number(&self) -> usize {
        match self {
            Field::Name => 1,
            Field::Email => 2,
            Field::Reason => 3,
            Field::Message => 4,
        }
    }

    /// Stable identifier used in error payloads and wire bodies.
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Reason => "reason",
            Field::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Reason => "Reason",
            Field::Message => "Message",
        }
    }

    pub(crate) fn next(&self) -> Option<Field> {
        match self {
            Field::Name => Some(Field::Email),
            Field::Email => Some(Field::Reason),
            Field::Reason => Some(Field::Message),
            Field::Message => None,
        }
    }

    pub(crate) fn previous(&self) -> Option<Field> {
        match self {
            Field::Name => None,
            Field::Email => Some(Field::Name),
            Field::Reason => Some(Field::Email),
            Field::Message => Some(Field::Reason),
        }
    }
}

/// The entity assembled across wizard steps.
///
/// Owned exclusively by the controller; views only ever see `&ContactRecord`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub reason: Option<Reason>,
    pub message: String,
}

impl ContactRecord {
    /// Textual value of a field as the validator sees it. The reason field
    /// reads as its identifier, or empty while unselected.
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Reason => self.reason.map(|reason| reason.id()).unwrap_or_default(),
            Field::Message => &self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.reason.is_none()
            && self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_numbers_follow_field_order() {
        for (idx, field) in Field::ORDER.iter().enumerate() {
            assert_eq!(field.step_number(), idx + 1);
        }
    }

    #[test]
    fn navigation_is_consistent() {
        assert_eq!(Field::Name.previous(), None);
        assert_eq!(Field::Message.next(), None);
        for pair in Field::ORDER.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }
}
