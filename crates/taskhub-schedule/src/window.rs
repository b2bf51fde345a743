//! Calendar view windowing and navigation.
//!
//! Buckets events into day cells for the day/week/month views. Bucketing is
//! by local calendar date of the event start; weeks start on Sunday; the
//! month grid is padded with leading blank cells so weekday columns line up.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::CalendarEvent;

/// Calendar display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewGranularity {
    Day,
    Week,
    Month,
}

/// Navigation state for the calendar.
///
/// Navigation is a pure local state change; it never triggers a fetch, it
/// only changes which already-loaded events are windowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub reference: NaiveDate,
    pub granularity: ViewGranularity,
}

impl ViewState {
    pub fn new(reference: NaiveDate, granularity: ViewGranularity) -> Self {
        Self {
            reference,
            granularity,
        }
    }

    /// Shift back one unit of the current granularity.
    pub fn prev(&mut self) {
        self.reference = match self.granularity {
            ViewGranularity::Month => self
                .reference
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.reference),
            ViewGranularity::Week => self
                .reference
                .checked_sub_days(Days::new(7))
                .unwrap_or(self.reference),
            ViewGranularity::Day => self
                .reference
                .checked_sub_days(Days::new(1))
                .unwrap_or(self.reference),
        };
    }

    /// Shift forward one unit of the current granularity.
    pub fn next(&mut self) {
        self.reference = match self.granularity {
            ViewGranularity::Month => self
                .reference
                .checked_add_months(Months::new(1))
                .unwrap_or(self.reference),
            ViewGranularity::Week => self
                .reference
                .checked_add_days(Days::new(7))
                .unwrap_or(self.reference),
            ViewGranularity::Day => self
                .reference
                .checked_add_days(Days::new(1))
                .unwrap_or(self.reference),
        };
    }

    /// Reset the reference date to today.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference = today;
    }

    /// Switch display mode, keeping the reference date.
    pub fn set_granularity(&mut self, granularity: ViewGranularity) {
        self.granularity = granularity;
    }
}

/// One cell of a calendar grid.
///
/// `date` is `None` for the leading blank cells that pad the month grid to
/// align weekday columns.
#[derive(Debug)]
pub struct CalendarCell<'a> {
    pub date: Option<NaiveDate>,
    pub events: Vec<&'a CalendarEvent>,
}

impl CalendarCell<'_> {
    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }
}

/// Produce the ordered cells for a view.
pub fn window<'a>(
    events: &'a [CalendarEvent],
    reference: NaiveDate,
    granularity: ViewGranularity,
) -> Vec<CalendarCell<'a>> {
    match granularity {
        ViewGranularity::Month => month_cells(events, reference),
        ViewGranularity::Week => week_cells(events, reference),
        ViewGranularity::Day => vec![day_cell(events, reference)],
    }
}

/// The Sunday on or before the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(back))).unwrap_or(date)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of next month minus first of this month.
    let first = first_of_month(date);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn month_cells<'a>(events: &'a [CalendarEvent], reference: NaiveDate) -> Vec<CalendarCell<'a>> {
    let first = first_of_month(reference);
    let leading = first.weekday().num_days_from_sunday();
    let days = days_in_month(reference);

    let mut cells = Vec::with_capacity(leading as usize + days as usize);
    for _ in 0..leading {
        cells.push(CalendarCell {
            date: None,
            events: Vec::new(),
        });
    }
    for offset in 0..days {
        let date = first
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(first);
        cells.push(day_cell(events, date));
    }
    cells
}

fn week_cells<'a>(events: &'a [CalendarEvent], reference: NaiveDate) -> Vec<CalendarCell<'a>> {
    let start = week_start(reference);
    (0..7)
        .map(|offset| {
            let date = start
                .checked_add_days(Days::new(offset))
                .unwrap_or(start);
            day_cell(events, date)
        })
        .collect()
}

fn day_cell<'a>(events: &'a [CalendarEvent], date: NaiveDate) -> CalendarCell<'a> {
    let matching = events
        .iter()
        .filter(|event| event.due_date() == date)
        .collect();
    CalendarCell {
        date: Some(date),
        events: matching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{DerivedStatus, WorkflowStatus};
    use crate::types::EventKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(id: i64, due: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id,
            title: format!("event {}", id),
            description: None,
            start: due.and_hms_opt(0, 0, 0).unwrap(),
            end: due.and_hms_opt(23, 59, 59).unwrap(),
            kind: EventKind::Task,
            workflow: WorkflowStatus::Ongoing,
            status: DerivedStatus::Upcoming,
            assignee: None,
            assignee_email: None,
            collaborators: Vec::new(),
        }
    }

    #[test]
    fn test_month_grid_shape() {
        // February 2024: 29 days, the 1st is a Thursday (weekday index 4).
        let cells = window(&[], date(2024, 2, 15), ViewGranularity::Month);
        assert_eq!(cells.len(), 4 + 29);
        assert!(cells[..4].iter().all(CalendarCell::is_blank));
        assert_eq!(cells[4].date, Some(date(2024, 2, 1)));
        assert_eq!(cells.last().unwrap().date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_blanks() {
        // September 2024 starts on a Sunday.
        let cells = window(&[], date(2024, 9, 10), ViewGranularity::Month);
        assert_eq!(cells.len(), 30);
        assert!(!cells[0].is_blank());
    }

    #[test]
    fn test_month_buckets_events_by_local_date() {
        let events = vec![
            event_on(1, date(2024, 2, 10)),
            event_on(2, date(2024, 2, 10)),
            event_on(3, date(2024, 3, 10)),
        ];
        let cells = window(&events, date(2024, 2, 1), ViewGranularity::Month);

        let feb_10 = cells
            .iter()
            .find(|c| c.date == Some(date(2024, 2, 10)))
            .unwrap();
        assert_eq!(feb_10.events.len(), 2);

        let total: usize = cells.iter().map(|c| c.events.len()).sum();
        assert_eq!(total, 2, "event in another month must not appear");
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-01-10 is a Wednesday; its week starts Sunday 2024-01-07.
        let cells = window(&[], date(2024, 1, 10), ViewGranularity::Week);
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0].date, Some(date(2024, 1, 7)));
        assert_eq!(cells[6].date, Some(date(2024, 1, 13)));
    }

    #[test]
    fn test_week_start_of_a_sunday_is_itself() {
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 7));
    }

    #[test]
    fn test_day_view_single_cell() {
        let events = vec![event_on(1, date(2024, 1, 10)), event_on(2, date(2024, 1, 11))];
        let cells = window(&events, date(2024, 1, 10), ViewGranularity::Day);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].events.len(), 1);
        assert_eq!(cells[0].events[0].id, 1);
    }

    #[test]
    fn test_navigation_units() {
        let mut state = ViewState::new(date(2024, 1, 31), ViewGranularity::Month);
        state.next();
        // Clamped to the end of February.
        assert_eq!(state.reference, date(2024, 2, 29));
        state.prev();
        assert_eq!(state.reference, date(2024, 1, 29));

        state.set_granularity(ViewGranularity::Week);
        state.next();
        assert_eq!(state.reference, date(2024, 2, 5));

        state.set_granularity(ViewGranularity::Day);
        state.prev();
        assert_eq!(state.reference, date(2024, 2, 4));

        state.go_to_today(date(2024, 6, 1));
        assert_eq!(state.reference, date(2024, 6, 1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 12, 5)), 31);
        assert_eq!(days_in_month(date(2024, 4, 30)), 30);
    }
}
