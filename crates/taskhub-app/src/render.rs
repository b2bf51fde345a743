//! Plain-text rendering of schedule views.

use chrono::{Datelike, NaiveDate};

use taskhub_schedule::{
    window, CalendarEvent, DerivedStatus, TeamMember, ViewGranularity, WorkloadLevel,
};

/// One-character marker per derived status, most urgent first.
fn status_marker(status: DerivedStatus) -> char {
    match status {
        DerivedStatus::Overdue => '!',
        DerivedStatus::Ongoing => '*',
        DerivedStatus::Upcoming => '+',
        DerivedStatus::Completed => '.',
    }
}

/// Marker for a day cell: the most urgent status among its events.
fn cell_marker(events: &[&CalendarEvent]) -> char {
    let mut marker = ' ';
    for event in events {
        let candidate = status_marker(event.status);
        marker = match (marker, candidate) {
            (_, '!') => '!',
            ('!', _) => '!',
            (_, '*') => '*',
            ('*', _) => '*',
            (_, '+') => '+',
            ('+', _) => '+',
            _ => candidate,
        };
    }
    marker
}

/// Month grid: weekday header, leading blanks, one marked cell per day.
pub fn month_view(events: &[CalendarEvent], reference: NaiveDate) -> String {
    let cells = window(events, reference, ViewGranularity::Month);

    let mut out = String::new();
    out.push_str(&format!("{:^28}\n", reference.format("%B %Y").to_string()));
    out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa\n");

    for (i, cell) in cells.iter().enumerate() {
        match cell.date {
            None => out.push_str("    "),
            Some(date) => {
                out.push_str(&format!("{:>3}{}", date.day(), cell_marker(&cell.events)));
            }
        }
        if (i + 1) % 7 == 0 {
            out.push('\n');
        }
    }
    if cells.len() % 7 != 0 {
        out.push('\n');
    }
    out
}

/// Week strip: seven day columns starting on Sunday.
pub fn week_view(events: &[CalendarEvent], reference: NaiveDate) -> String {
    let cells = window(events, reference, ViewGranularity::Week);

    let mut out = String::new();
    for cell in &cells {
        if let Some(date) = cell.date {
            out.push_str(&format!(
                "{} {:>2}{}  ",
                date.format("%a"),
                date.day(),
                cell_marker(&cell.events)
            ));
        }
    }
    out.push('\n');
    out
}

/// Day view: the single cell for the reference date, one line per deadline.
pub fn day_view(events: &[CalendarEvent], reference: NaiveDate) -> String {
    let cells = window(events, reference, ViewGranularity::Day);

    let mut out = format!("{}\n", reference.format("%A %Y-%m-%d"));
    for cell in &cells {
        if cell.events.is_empty() {
            out.push_str("  (no deadlines)\n");
        }
        for event in &cell.events {
            out.push_str(&format!(
                "  {} [{:<7}] {:<9} {}\n",
                status_marker(event.status),
                event.kind.as_str(),
                event.status.as_str(),
                event.title
            ));
        }
    }
    out
}

/// Deadline list, soonest first.
pub fn deadline_list(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No upcoming deadlines\n".to_string();
    }

    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);

    let mut out = String::new();
    for event in sorted {
        out.push_str(&format!(
            "{}  [{:<7}] {:<9} {}",
            event.due_date(),
            event.kind.as_str(),
            event.status.as_str(),
            event.title
        ));
        if let Some(assignee) = event.assignee_email.as_deref().or(event.assignee.as_deref()) {
            out.push_str(&format!("  ({})", assignee));
        }
        out.push('\n');
    }
    out
}

/// Workload table with the display emphasis band per member.
pub fn workload_table(members: &[TeamMember]) -> String {
    if members.is_empty() {
        return "No team members found\n".to_string();
    }

    let mut out = String::new();
    for member in members {
        let level = WorkloadLevel::from_count(member.workload);
        out.push_str(&format!(
            "{:<20} {:<12} {:>2} items ({})",
            member.name, member.role, member.workload, level.as_str()
        ));
        if member.overdue_count > 0 {
            out.push_str(&format!("  {} overdue", member.overdue_count));
        }
        out.push('\n');
    }
    out
}
