//! Polling feed for schedule data.
//!
//! Re-fetches the personal/team/roster dataset on a fixed interval and keeps
//! the latest normalized snapshot in memory. Every dispatch takes a new
//! generation number and a response is only applied while its generation is
//! still the latest, so a slow response that arrives after a newer one is
//! discarded instead of overwriting it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;

use crate::client::ScheduleClient;
use crate::error::ScheduleError;
use crate::types::{normalize_events, CalendarEvent, TeamMember};
use crate::workload::backfill_workload;

/// One complete refresh of the schedule dataset.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    pub personal: Vec<CalendarEvent>,
    pub team: Vec<CalendarEvent>,
    pub roster: Vec<TeamMember>,
    pub fetched_at: NaiveDateTime,
}

pub struct ScheduleFeed {
    client: ScheduleClient,
    latest: AtomicU64,
    snapshot: Mutex<Option<ScheduleSnapshot>>,
    last_error: Mutex<Option<String>>,
}

impl ScheduleFeed {
    pub fn new(client: ScheduleClient) -> Arc<Self> {
        Arc::new(Self {
            client,
            latest: AtomicU64::new(0),
            snapshot: Mutex::new(None),
            last_error: Mutex::new(None),
        })
    }

    /// Fetch everything once and apply the result if still current.
    ///
    /// Returns `Ok(true)` when the snapshot was applied, `Ok(false)` when it
    /// was discarded because a newer refresh was dispatched meanwhile. On
    /// error the previous snapshot stays in place.
    ///
    /// # Errors
    /// Propagates fetch errors; the stored snapshot is left untouched.
    pub async fn refresh(&self) -> Result<bool, ScheduleError> {
        self.refresh_for(Local::now().date_naive()).await
    }

    async fn refresh_for(&self, today: NaiveDate) -> Result<bool, ScheduleError> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.fetch_snapshot(today).await;
        match result {
            Ok(snapshot) => {
                let applied = self.apply(generation, snapshot);
                if applied {
                    *self.last_error.lock() = None;
                }
                Ok(applied)
            }
            Err(e) => {
                *self.last_error.lock() = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn fetch_snapshot(&self, today: NaiveDate) -> Result<ScheduleSnapshot, ScheduleError> {
        let personal_raw = self.client.personal_events().await?;
        let team_raw = self.client.team_events().await?;
        let roster = self.client.team_roster().await?;

        let personal = normalize_events(personal_raw, today);
        let team = normalize_events(team_raw, today);

        let mut members = roster.members;
        if roster.needs_backfill {
            backfill_workload(&mut members, &team);
        }

        Ok(ScheduleSnapshot {
            personal,
            team,
            roster: members,
            fetched_at: Local::now().naive_local(),
        })
    }

    /// Apply a fetched snapshot unless a newer refresh has been dispatched.
    fn apply(&self, generation: u64, snapshot: ScheduleSnapshot) -> bool {
        if self.latest.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                generation,
                "Discarding stale schedule response; a newer refresh is in flight"
            );
            return false;
        }
        *self.snapshot.lock() = Some(snapshot);
        true
    }

    /// Latest applied snapshot, if any refresh has succeeded yet.
    pub fn snapshot(&self) -> Option<ScheduleSnapshot> {
        self.snapshot.lock().clone()
    }

    /// Non-blocking notification text from the most recent failed refresh.
    /// Cleared by the next successful one.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Spawn the fixed-interval polling loop.
    ///
    /// Transient failures keep the stale snapshot and wait for the next
    /// tick; an expired session ends the loop since every further request
    /// would be rejected anyway.
    pub fn spawn_polling(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let feed = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match feed.refresh().await {
                    Ok(true) => {}
                    Ok(false) => {}
                    Err(e) if e.is_auth_error() => {
                        tracing::warn!("Stopping schedule polling: {}", e);
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Schedule refresh failed, keeping stale data: {}", e);
                    }
                }
            }
        })
    }
}
