use thiserror::Error;

/// Errors raised when building or mutating appointment records.
///
/// The view operations themselves never fail: an absent reference date or a
/// date that cannot be parsed simply yields an empty view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgendaError {
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time: '{0}'. Expected HH:MM (24-hour)")]
    InvalidTime(String),

    #[error("Invalid duration: {minutes} minutes (minimum is {minimum})")]
    InvalidDuration { minutes: u32, minimum: u32 },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid status: '{0}'. Must be one of: scheduled, confirmed, pending, completed, cancelled")]
    InvalidStatus(String),

    #[error("Invalid view: '{0}'. Must be one of: day, week, month")]
    InvalidGranularity(String),

    #[error("Unknown patient id: {0}")]
    UnknownPatient(u32),

    #[error("Unknown professional id: {0}")]
    UnknownProfessional(u32),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(u32),

    #[error("Duplicate appointment id: {0}")]
    DuplicateId(u32),

    #[error("No appointment ids left to assign")]
    IdSpaceExhausted,
}

pub type Result<T> = std::result::Result<T, AgendaError>;
