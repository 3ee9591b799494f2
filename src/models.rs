//! Data models for the appointment calendar.
//!
//! This module defines the core data structures used throughout the system:
//! - AppointmentStatus: lifecycle label of a session
//! - Granularity / Direction: calendar view unit and navigation direction
//! - Appointment: a stored session with its assigned id
//! - NewAppointment: a validated session that has not been given an id yet
//! - AppointmentForm: raw form input, resolved against the directory

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{AgendaError, Result};

/// Status of an appointment as shown on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Pending,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Convert a string to a status value.
    pub fn from_string(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "pending" => Ok(AppointmentStatus::Pending),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(AgendaError::InvalidStatus(value.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Calendar view unit. Controls both range resolution and navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn from_string(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            _ => Err(AgendaError::InvalidGranularity(value.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Parse a canonical `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AgendaError::InvalidDate(value.to_string()))
}

/// Parse a 24-hour `HH:MM` clock time.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| AgendaError::InvalidTime(value.to_string()))
}

/// Serde adapter keeping clock times in their `HH:MM` form.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Start times offered on the appointment form.
pub fn time_options() -> Vec<NaiveTime> {
    let (first_h, first_m) = config::FIRST_TIME_OPTION;
    let (last_h, last_m) = config::LAST_TIME_OPTION;
    let (Some(first), Some(last)) = (
        NaiveTime::from_hms_opt(first_h, first_m, 0),
        NaiveTime::from_hms_opt(last_h, last_m, 0),
    ) else {
        return Vec::new();
    };

    let mut options = Vec::new();
    let mut current = first;
    while current <= last {
        options.push(current);
        let (next, wrapped) =
            current.overflowing_add_signed(Duration::minutes(config::TIME_OPTION_STEP_MINUTES));
        if wrapped != 0 {
            break;
        }
        current = next;
    }
    options
}

/// A stored appointment. Names are display strings, not foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub patient_name: String,
    pub professional_name: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AppointmentStatus,
    pub insurance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Attach an id to a validated record.
    pub fn from_new(id: u32, new: NewAppointment) -> Self {
        Appointment {
            id,
            patient_name: new.patient_name,
            professional_name: new.professional_name,
            date: new.date,
            time: new.time,
            duration_minutes: new.duration_minutes,
            kind: new.kind,
            status: new.status,
            insurance: new.insurance,
            notes: new.notes,
        }
    }

    /// Check the record-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(AgendaError::InvalidDuration {
                minutes: 0,
                minimum: 1,
            });
        }
        if self.patient_name.trim().is_empty() {
            return Err(AgendaError::EmptyField("Patient name"));
        }
        if self.professional_name.trim().is_empty() {
            return Err(AgendaError::EmptyField("Professional name"));
        }
        Ok(())
    }

    /// Clock time at which the session ends. Wraps past midnight.
    pub fn end_time(&self) -> NaiveTime {
        self.time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// `HH:MM - HH:MM` span shown on appointment cards.
    pub fn time_span(&self) -> String {
        format!(
            "{} - {}",
            self.time.format("%H:%M"),
            self.end_time().format("%H:%M")
        )
    }
}

/// A validated appointment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_name: String,
    pub professional_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub kind: String,
    pub status: AppointmentStatus,
    pub insurance: String,
    pub notes: Option<String>,
}

impl NewAppointment {
    /// Create a new appointment with validation.
    pub fn new(
        patient_name: String,
        professional_name: String,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
        kind: String,
    ) -> Result<Self> {
        if patient_name.trim().is_empty() {
            return Err(AgendaError::EmptyField("Patient name"));
        }
        if professional_name.trim().is_empty() {
            return Err(AgendaError::EmptyField("Professional name"));
        }
        if kind.trim().is_empty() {
            return Err(AgendaError::EmptyField("Session type"));
        }
        if duration_minutes < config::MIN_DURATION_MINUTES {
            return Err(AgendaError::InvalidDuration {
                minutes: duration_minutes,
                minimum: config::MIN_DURATION_MINUTES,
            });
        }

        Ok(NewAppointment {
            patient_name,
            professional_name,
            date,
            time: time.with_second(0).unwrap_or(time),
            duration_minutes,
            kind,
            status: AppointmentStatus::default(),
            insurance: config::SELF_PAY.to_string(),
            notes: None,
        })
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_insurance(mut self, insurance: Option<String>) -> Self {
        if let Some(label) = insurance.filter(|label| !label.trim().is_empty()) {
            self.insurance = label;
        }
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|text| !text.trim().is_empty());
        self
    }
}

/// Raw appointment form input. Patient and professional are picked by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentForm {
    pub patient_id: u32,
    pub professional_id: u32,
    pub date: String,
    pub time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_duration() -> u32 {
    config::DEFAULT_DURATION_MINUTES
}
