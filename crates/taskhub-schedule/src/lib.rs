//! Schedule/calendar aggregation for TaskHub.
//!
//! Fetches personal and team deadlines from the backend, derives display
//! statuses, windows events into calendar views and aggregates per-member
//! workload.

pub mod client;
pub mod error;
pub mod feed;
pub mod status;
pub mod types;
pub mod window;
pub mod workload;

pub use client::{Roster, ScheduleClient};
pub use error::ScheduleError;
pub use feed::{ScheduleFeed, ScheduleSnapshot};
pub use status::{classify, DerivedStatus, WorkflowStatus};
pub use types::{normalize_events, ApiEvent, CalendarEvent, EventKind, TeamMember};
pub use window::{window, CalendarCell, ViewGranularity, ViewState};
pub use workload::{backfill_workload, filter_events, MemberFilter, WorkloadLevel};
