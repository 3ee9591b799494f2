//! Selection and ordering of the appointments visible in a date range.

use chrono::NaiveDate;

use crate::models::{Appointment, Granularity};
use crate::range::{resolve_range, DateRange};

/// Appointments dated inside `range`, optionally restricted to one
/// professional (exact name match), ordered by date then time.
///
/// The sort is stable, so records sharing a date and time keep their
/// original relative order. `records` is never modified.
pub fn filter_appointments(
    records: &[Appointment],
    range: &DateRange,
    professional: Option<&str>,
) -> Vec<Appointment> {
    let mut matching: Vec<Appointment> = records
        .iter()
        .filter(|a| range.contains(&a.date))
        .filter(|a| professional.map_or(true, |name| a.professional_name == name))
        .cloned()
        .collect();

    matching.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
    matching
}

/// Resolve the range for `reference` and filter against it.
///
/// With no reference date there is nothing to show.
pub fn appointments_for(
    records: &[Appointment],
    reference: Option<NaiveDate>,
    granularity: Granularity,
    professional: Option<&str>,
) -> Vec<Appointment> {
    match reference {
        Some(date) => filter_appointments(records, &resolve_range(date, granularity), professional),
        None => Vec::new(),
    }
}
