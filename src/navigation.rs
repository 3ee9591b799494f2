//! Previous/next stepping of the calendar's reference date.

use chrono::{Datelike, NaiveDate};

use crate::models::{Direction, Granularity};
use crate::range::{add_days, month_start};

/// Move the reference date one view unit forward or back.
///
/// Month steps land on the first of the target month, so repeated month
/// navigation never drifts onto a day the shorter month does not have.
pub fn step(reference: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    match granularity {
        Granularity::Day => add_days(reference, direction.sign()),
        Granularity::Week => add_days(reference, 7 * direction.sign()),
        Granularity::Month => step_month(reference, direction),
    }
}

fn step_month(reference: NaiveDate, direction: Direction) -> NaiveDate {
    let first = month_start(reference);
    let (year, month) = match (direction, first.month()) {
        (Direction::Next, 12) => (first.year() + 1, 1),
        (Direction::Next, m) => (first.year(), m + 1),
        (Direction::Previous, 1) => (first.year() - 1, 12),
        (Direction::Previous, m) => (first.year(), m - 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}
