//! Calendar view assembly.
//!
//! `ViewState` is what the screen remembers between interactions: the
//! reference date, the granularity and the professional filter.
//! `CalendarView::build` turns it and the current records into everything
//! the screen draws: a heading, the resolved range, and either a flat list
//! (day view) or per-day buckets (week and month views).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::filter_appointments;
use crate::grouping::{group_by_day, DayBucket};
use crate::models::{Appointment, Direction, Granularity};
use crate::navigation::step;
use crate::range::{resolve_range, DateRange};
use crate::summary::StatusSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub reference_date: Option<NaiveDate>,
    pub granularity: Granularity,
    pub professional_filter: Option<String>,
}

impl ViewState {
    pub fn new(reference_date: NaiveDate, granularity: Granularity) -> Self {
        ViewState {
            reference_date: Some(reference_date),
            granularity,
            professional_filter: None,
        }
    }

    /// Set or clear the professional filter. A blank name clears it.
    pub fn set_professional(&mut self, name: Option<String>) {
        self.professional_filter = name.filter(|n| !n.trim().is_empty());
    }

    /// Step the reference date one unit. Does nothing without a date.
    pub fn navigate(&mut self, direction: Direction) {
        if let Some(date) = self.reference_date {
            let next = step(date, self.granularity, direction);
            debug!(from = %date, to = %next, granularity = self.granularity.name(), "Navigated");
            self.reference_date = Some(next);
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        self.reference_date
            .map(|date| resolve_range(date, self.granularity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum ViewLayout {
    List(Vec<Appointment>),
    Buckets(Vec<DayBucket>),
}

impl ViewLayout {
    /// Number of appointments shown, across all buckets.
    pub fn appointment_count(&self) -> usize {
        match self {
            ViewLayout::List(items) => items.len(),
            ViewLayout::Buckets(buckets) => buckets.iter().map(|b| b.appointments.len()).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarView {
    pub label: String,
    pub range: Option<DateRange>,
    pub layout: ViewLayout,
    pub summary: StatusSummary,
}

impl CalendarView {
    pub fn build(records: &[Appointment], state: &ViewState) -> Self {
        let Some(range) = state.range() else {
            return CalendarView {
                label: String::new(),
                range: None,
                layout: ViewLayout::List(Vec::new()),
                summary: StatusSummary::default(),
            };
        };

        let filtered = filter_appointments(records, &range, state.professional_filter.as_deref());
        let summary = StatusSummary::from_appointments(&filtered);

        let mut label = range_label(&range);
        if let Some(name) = &state.professional_filter {
            label.push_str(" - ");
            label.push_str(name);
        }

        let layout = match range.granularity {
            Granularity::Day => ViewLayout::List(filtered),
            Granularity::Week | Granularity::Month => {
                ViewLayout::Buckets(group_by_day(&filtered, &range.dates))
            }
        };

        CalendarView {
            label,
            range: Some(range),
            layout,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout.appointment_count() == 0
    }
}

/// Heading for a resolved range.
///
/// Day: `Thursday, June 15, 2023`. Week: `Week of June 12–18, 2023`, with
/// both ends spelled out when the week spans two months or years.
/// Month: `June 2023`.
pub fn range_label(range: &DateRange) -> String {
    match range.granularity {
        Granularity::Day => range.start.format("%A, %B %-d, %Y").to_string(),
        Granularity::Week => week_label(range.start, range.end),
        Granularity::Month => range.start.format("%B %Y").to_string(),
    }
}

fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() != end.year() {
        format!(
            "Week of {} – {}",
            start.format("%B %-d, %Y"),
            end.format("%B %-d, %Y")
        )
    } else if start.month() != end.month() {
        format!(
            "Week of {} – {}, {}",
            start.format("%B %-d"),
            end.format("%B %-d"),
            end.year()
        )
    } else {
        format!(
            "Week of {}–{}, {}",
            start.format("%B %-d"),
            end.day(),
            end.year()
        )
    }
}
