//! Deadline status derivation.
//!
//! Two distinct status vocabularies meet here and must not be conflated:
//!
//! - [`WorkflowStatus`] is what the backend stores for a task or project
//!   ("Unassigned", "Ongoing", "Pending Review", ...).
//! - [`DerivedStatus`] is the calendar's display label (completed / ongoing /
//!   overdue / upcoming), recomputed from the workflow status and the due
//!   date on every read. It is never persisted, so the same record can
//!   classify differently on different days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored workflow status of a task or project, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Unassigned,
    Ongoing,
    PendingReview,
    InProgress,
    Completed,
    /// Statuses this client does not know about are carried through verbatim.
    Other(String),
}

impl WorkflowStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Unassigned" => Self::Unassigned,
            "Ongoing" => Self::Ongoing,
            "Pending Review" => Self::PendingReview,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unassigned => "Unassigned",
            Self::Ongoing => "Ongoing",
            Self::PendingReview => "Pending Review",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Other(s) => s,
        }
    }
}

/// Display status derived at read time from workflow status and due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedStatus {
    Completed,
    Ongoing,
    Overdue,
    Upcoming,
}

impl DerivedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Ongoing => "ongoing",
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Classify a record for calendar display.
///
/// Completed is terminal: the due date is irrelevant once a record is done.
/// Everything else is pure deadline proximity at day granularity. A workflow
/// status of "Ongoing" with a future due date still classifies as upcoming;
/// the calendar vocabulary tracks deadlines, not workflow state.
///
/// Both dates are already day-truncated (`NaiveDate`), so a due-today item
/// cannot flip to overdue late in the evening.
pub fn classify(workflow: &WorkflowStatus, due: NaiveDate, today: NaiveDate) -> DerivedStatus {
    if workflow.is_completed() {
        return DerivedStatus::Completed;
    }

    match due.cmp(&today) {
        std::cmp::Ordering::Less => DerivedStatus::Overdue,
        std::cmp::Ordering::Equal => DerivedStatus::Ongoing,
        std::cmp::Ordering::Greater => DerivedStatus::Upcoming,
    }
}
