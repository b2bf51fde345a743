//! Per-member workload aggregation and the team view member filter.

use serde::{Deserialize, Serialize};

use crate::status::DerivedStatus;
use crate::types::{CalendarEvent, EventKind, TeamMember};

/// Team view filter: everything, or a single member by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFilter {
    All,
    Member(String),
}

impl MemberFilter {
    /// Parse the UI selection value; "all" is the identity filter.
    pub fn parse(selected: &str) -> Self {
        if selected == "all" {
            Self::All
        } else {
            Self::Member(selected.to_string())
        }
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        match self {
            Self::All => true,
            Self::Member(email) => event.involves(email),
        }
    }
}

/// Restrict the displayed event list to the selected member.
pub fn filter_events<'a>(
    events: &'a [CalendarEvent],
    filter: &MemberFilter,
) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| filter.matches(e)).collect()
}

/// Fill in per-member counts from the event list.
///
/// Workload counts non-completed items where the member is assignee or
/// collaborator; a member is counted once per event even when listed as
/// both. Used when the workload endpoint is unavailable and the roster
/// arrives with zeroed counts, and to compute the breakdown fields the
/// members endpoint never carries.
pub fn backfill_workload(members: &mut [TeamMember], events: &[CalendarEvent]) {
    for member in members.iter_mut() {
        let mut workload = 0;
        let mut task_count = 0;
        let mut project_count = 0;
        let mut overdue_count = 0;

        for event in events {
            if !event.involves(&member.email) {
                continue;
            }
            if event.status == DerivedStatus::Completed {
                continue;
            }
            workload += 1;
            match event.kind {
                EventKind::Task => task_count += 1,
                EventKind::Project => project_count += 1,
            }
            if event.status == DerivedStatus::Overdue {
                overdue_count += 1;
            }
        }

        member.workload = workload;
        member.task_count = task_count;
        member.project_count = project_count;
        member.overdue_count = overdue_count;
    }
}

/// Display emphasis band for a member's workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadLevel {
    Low,
    Medium,
    High,
}

impl WorkloadLevel {
    pub fn from_count(count: u32) -> Self {
        if count <= 2 {
            Self::Low
        } else if count <= 5 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}
