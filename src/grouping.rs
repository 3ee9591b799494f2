//! Per-day buckets for the week and month layouts.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Appointment;
use crate::range::GridCell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

impl DayBucket {
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

/// One bucket per entry of `dates`, in that order, empty days included.
/// Appointments keep the order they arrive in.
pub fn group_by_day(appointments: &[Appointment], dates: &[NaiveDate]) -> Vec<DayBucket> {
    let mut by_date: HashMap<NaiveDate, Vec<Appointment>> = HashMap::new();
    for appointment in appointments {
        by_date
            .entry(appointment.date)
            .or_default()
            .push(appointment.clone());
    }

    dates
        .iter()
        .map(|date| DayBucket {
            date: *date,
            appointments: by_date.get(date).cloned().unwrap_or_default(),
        })
        .collect()
}

/// A month grid cell with the appointments that fall on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBucket {
    pub cell: GridCell,
    pub appointments: Vec<Appointment>,
}

impl GridBucket {
    /// The first `limit` appointments and how many more were left out.
    pub fn preview(&self, limit: usize) -> (&[Appointment], usize) {
        let shown = self.appointments.len().min(limit);
        (&self.appointments[..shown], self.appointments.len() - shown)
    }
}

pub fn group_by_grid(appointments: &[Appointment], grid: &[GridCell]) -> Vec<GridBucket> {
    let dates: Vec<NaiveDate> = grid.iter().map(|c| c.date).collect();
    group_by_day(appointments, &dates)
        .into_iter()
        .zip(grid.iter())
        .map(|(bucket, cell)| GridBucket {
            cell: *cell,
            appointments: bucket.appointments,
        })
        .collect()
}
