//! Date ranges behind the day, week and month calendar views.
//!
//! Weeks start on Monday. A month range always covers the real number of
//! days in that month, leap years included.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Granularity;

/// Cells in the monthly grid: six Monday-first weeks.
pub const MONTH_GRID_CELLS: usize = 42;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Every date from `start` to `end`, inclusive.
    pub dates: Vec<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: &NaiveDate) -> bool {
        &self.start <= date && date <= &self.end
    }
}

/// Resolve the range a reference date covers at the given granularity.
pub fn resolve_range(reference: NaiveDate, granularity: Granularity) -> DateRange {
    let (start, end) = match granularity {
        Granularity::Day => (reference, reference),
        Granularity::Week => {
            let start = week_start(reference);
            (start, add_days(start, 6))
        }
        Granularity::Month => (month_start(reference), month_end(reference)),
    };

    DateRange {
        granularity,
        start,
        end,
        dates: dates_between(start, end),
    }
}

/// Most recent Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    add_days(date, -i64::from(offset))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Saturating day arithmetic; clamps at the ends of the representable range.
pub(crate) fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

fn dates_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// One cell of the monthly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// The 42-cell grid shown for a month, starting on the Monday on or before
/// the first of the month. Cells outside the month are flagged.
pub fn month_grid(reference: NaiveDate) -> Vec<GridCell> {
    let first = month_start(reference);
    let grid_start = week_start(first);
    grid_start
        .iter_days()
        .take(MONTH_GRID_CELLS)
        .map(|date| GridCell {
            date,
            in_month: date.year() == first.year() && date.month() == first.month(),
        })
        .collect()
}

/// Weekday headers for the grid, Monday first.
pub fn grid_weekdays() -> [Weekday; 7] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn day_range_is_single_date() {
        let range = resolve_range(date("2023-06-15"), Granularity::Day);
        assert_eq!(range.start, date("2023-06-15"));
        assert_eq!(range.end, date("2023-06-15"));
        assert_eq!(range.dates, vec![date("2023-06-15")]);
    }

    #[test]
    fn week_of_a_thursday() {
        let range = resolve_range(date("2023-06-15"), Granularity::Week);
        assert_eq!(range.start, date("2023-06-12"));
        assert_eq!(range.end, date("2023-06-18"));
        assert_eq!(range.dates.len(), 7);
        assert_eq!(range.start.weekday(), Weekday::Mon);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let range = resolve_range(date("2023-06-18"), Granularity::Week);
        assert_eq!(range.start, date("2023-06-12"));
        assert_eq!(range.dates[6], date("2023-06-18"));
    }

    #[test]
    fn week_is_the_same_for_every_day_in_it() {
        let expected = resolve_range(date("2023-06-12"), Granularity::Week);
        for day in date("2023-06-12").iter_days().take(7) {
            assert_eq!(resolve_range(day, Granularity::Week), expected);
        }
    }

    #[test]
    fn week_crosses_year_boundary() {
        let range = resolve_range(date("2025-01-01"), Granularity::Week);
        assert_eq!(range.start, date("2024-12-30"));
        assert_eq!(range.end, date("2025-01-05"));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(resolve_range(date("2023-06-15"), Granularity::Month).dates.len(), 30);
        assert_eq!(resolve_range(date("2023-01-31"), Granularity::Month).dates.len(), 31);
        assert_eq!(resolve_range(date("2023-02-10"), Granularity::Month).dates.len(), 28);
        assert_eq!(resolve_range(date("2024-02-10"), Granularity::Month).dates.len(), 29);
        assert_eq!(resolve_range(date("2000-02-01"), Granularity::Month).dates.len(), 29);
        assert_eq!(resolve_range(date("1900-02-01"), Granularity::Month).dates.len(), 28);
    }

    #[test]
    fn month_range_bounds() {
        let range = resolve_range(date("2023-12-25"), Granularity::Month);
        assert_eq!(range.start, date("2023-12-01"));
        assert_eq!(range.end, date("2023-12-31"));
    }

    #[test]
    fn every_range_contains_its_reference_date() {
        let granularities = [Granularity::Day, Granularity::Week, Granularity::Month];
        for reference in date("2023-12-20").iter_days().take(80) {
            for granularity in granularities {
                let range = resolve_range(reference, granularity);
                assert!(range.dates.contains(&reference));
                assert!(range.contains(&reference));
                let expected = match granularity {
                    Granularity::Day => 1..=1,
                    Granularity::Week => 7..=7,
                    Granularity::Month => 28..=31,
                };
                assert!(expected.contains(&range.dates.len()));
            }
        }
    }

    #[test]
    fn month_grid_starts_on_monday() {
        // June 2023 begins on a Thursday.
        let grid = month_grid(date("2023-06-15"));
        assert_eq!(grid.len(), MONTH_GRID_CELLS);
        assert_eq!(grid[0].date, date("2023-05-29"));
        assert!(!grid[0].in_month);
        assert_eq!(grid[3].date, date("2023-06-01"));
        assert!(grid[3].in_month);
        assert_eq!(grid.iter().filter(|c| c.in_month).count(), 30);
    }

    #[test]
    fn month_grid_when_first_is_sunday() {
        // October 2023 begins on a Sunday: six padding days before it.
        let grid = month_grid(date("2023-10-01"));
        assert_eq!(grid[0].date, date("2023-09-25"));
        assert_eq!(grid[6].date, date("2023-10-01"));
    }

    #[test]
    fn month_grid_when_first_is_monday() {
        let grid = month_grid(date("2023-05-20"));
        assert_eq!(grid[0].date, date("2023-05-01"));
        assert!(grid[0].in_month);
    }

    #[test]
    fn weekday_headers_start_monday() {
        let headers = grid_weekdays();
        assert_eq!(headers[0], Weekday::Mon);
        assert_eq!(headers[6], Weekday::Sun);
    }
}
