//! Status counts and percentages for the dashboard cards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub by_status: HashMap<AppointmentStatus, usize>,
}

impl StatusSummary {
    pub fn from_appointments<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut summary = StatusSummary::default();
        for appointment in appointments {
            summary.total += 1;
            *summary.by_status.entry(appointment.status).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, status: AppointmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Share of appointments with `status`, as a percentage.
    pub fn rate(&self, status: AppointmentStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count(status) as f64 / self.total as f64) * 100.0
    }

    pub fn confirmation_rate(&self) -> f64 {
        self.rate(AppointmentStatus::Confirmed)
    }

    pub fn completion_rate(&self) -> f64 {
        self.rate(AppointmentStatus::Completed)
    }
}
