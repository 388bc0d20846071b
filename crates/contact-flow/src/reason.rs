use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of reasons offered on the third wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Collaboration,
    Freelance,
    Question,
    Other,
}

impl Reason {
    pub const ALL: [Reason; 4] = [
        Reason::Collaboration,
        Reason::Freelance,
        Reason::Question,
        Reason::Other,
    ];

    /// Stable identifier used on the wire and accepted from frontends.
    pub fn id(&self) -> &'static str {
        match self {
            Reason::Collaboration => "collaboration",
            Reason::Freelance => "freelance",
            Reason::Question => "question",
            Reason::Other => "other",
        }
    }

    /// Parses a reason identifier; unknown values yield `None`.
    pub fn from_id(id: &str) -> Option<Reason> {
        Reason::ALL.into_iter().find(|reason| reason.id() == id)
    }

    /// Display metadata for this reason.
    pub fn info(&self) -> &'static ReasonInfo {
        &REASONS[Reason::ALL
            .iter()
            .position(|reason| reason == self)
            .unwrap_or_default()]
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Static display metadata for one reason. Reference data consumed by the
/// surrounding page, never user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Reason metadata in the order the reason step lists them.
pub const REASONS: &[ReasonInfo] = &[
    ReasonInfo {
        id: "collaboration",
        label: "Collaboration",
        icon: "handshake",
        description: "Work together on a project or idea",
    },
    ReasonInfo {
        id: "freelance",
        label: "Freelance",
        icon: "briefcase",
        description: "Hire me for freelance work",
    },
    ReasonInfo {
        id: "question",
        label: "Question",
        icon: "question",
        description: "Ask about something I wrote or built",
    },
    ReasonInfo {
        id: "other",
        label: "Other",
        icon: "chat",
        description: "Anything that fits nowhere else",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for reason in Reason::ALL {
            assert_eq!(Reason::from_id(reason.id()), Some(reason));
        }
        assert_eq!(Reason::from_id("spam"), None);
    }

    #[test]
    fn info_table_matches_enum_order() {
        for (reason, info) in Reason::ALL.iter().zip(REASONS.iter()) {
            assert_eq!(reason.id(), info.id);
            assert_eq!(reason.info().id, info.id);
        }
    }
}
