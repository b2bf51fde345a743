//! Schedule API types and event normalization.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::status::{classify, DerivedStatus, WorkflowStatus};

/// What kind of record an event was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Task,
    Project,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
        }
    }
}

/// A deadline on the calendar, normalized from the API.
///
/// `start` and `end` are naive local wall times: the backend models deadlines
/// in the user's local calendar and day-bucketing must match the local date,
/// not the UTC date. In practice `start` and `end` fall on the same day
/// (single due-date semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: EventKind,
    /// Stored workflow status as reported by the backend.
    pub workflow: WorkflowStatus,
    /// Display status derived from `workflow` and the due date. Recomputed on
    /// every normalization pass, never persisted.
    pub status: DerivedStatus,
    pub assignee: Option<String>,
    pub assignee_email: Option<String>,
    pub collaborators: Vec<String>,
}

impl CalendarEvent {
    /// The local calendar date this deadline falls on.
    pub fn due_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whether the given member email is the assignee or a collaborator.
    pub fn involves(&self, email: &str) -> bool {
        self.assignee_email.as_deref() == Some(email)
            || self.assignee.as_deref() == Some(email)
            || self.collaborators.iter().any(|c| c == email)
    }

    /// Convert an API record to a normalized event.
    ///
    /// # Errors
    /// Returns `InvalidEventData` when the record has no start date or the
    /// date does not parse; callers drop such records per-item.
    pub fn from_api(api: ApiEvent, today: NaiveDate) -> Result<Self, ScheduleError> {
        let start = api
            .start
            .as_deref()
            .and_then(parse_event_time)
            .ok_or_else(|| {
                ScheduleError::InvalidEventData(format!(
                    "event {} ({:?}) has no usable start date",
                    api.id, api.start
                ))
            })?;

        let end = api
            .end
            .as_deref()
            .and_then(parse_event_time)
            .unwrap_or(start);

        let kind = match api.kind.as_str() {
            "project" => EventKind::Project,
            _ => EventKind::Task,
        };

        let workflow = WorkflowStatus::parse(api.status.as_deref().unwrap_or("Unassigned"));
        let status = classify(&workflow, start.date(), today);

        Ok(Self {
            id: api.id,
            title: api.title,
            description: api.description,
            start,
            end,
            kind,
            workflow,
            status,
            assignee: api.assignee,
            assignee_email: api.assignee_email,
            collaborators: api.collaborators,
        })
    }
}

/// Normalize a batch of API records.
///
/// Records with missing or unparseable dates are dropped individually and
/// logged; a bad record never aborts the batch.
pub fn normalize_events(raw: Vec<ApiEvent>, today: NaiveDate) -> Vec<CalendarEvent> {
    raw.into_iter()
        .filter_map(|api| {
            let id = api.id;
            match CalendarEvent::from_api(api, today) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Dropping calendar record {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// A team member with workload information.
///
/// When the roster comes from the fallback members endpoint the counts are
/// absent on the wire and backfilled client-side from the event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Non-completed items assigned to or collaborated on by this member.
    #[serde(default)]
    pub workload: u32,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub project_count: u32,
    #[serde(default)]
    pub overdue_count: u32,
}

// API Response Types

/// Raw calendar record as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// ISO-8601 string; the team endpoint emits null for records without a
    /// due date.
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Option<String>,
    pub assignee: Option<String>,
    #[serde(rename = "assigneeEmail")]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<String>,
}

/// Response for the personal and team event endpoints.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<ApiEvent>,
}

/// Response for the workload endpoint.
#[derive(Debug, Deserialize)]
pub struct WorkloadResponse {
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

/// Response for the fallback members endpoint.
#[derive(Debug, Deserialize)]
pub struct MembersResponse {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

fn parse_event_time(raw: &str) -> Option<NaiveDateTime> {
    // Backend format: datetime.isoformat() without offset.
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    // Offset-carrying timestamps keep their local wall time.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}
