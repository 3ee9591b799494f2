//! Application-level constants and form defaults.

pub const APP_NAME: &str = "Clinic Agenda";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session length pre-filled on the appointment form.
pub const DEFAULT_DURATION_MINUTES: u32 = 50;

/// Shortest session the form accepts.
pub const MIN_DURATION_MINUTES: u32 = 10;

/// Payer label for patients without a convênio.
pub const SELF_PAY: &str = "Self-pay";

/// First and last start times offered on the form, in 30 minute steps.
pub const FIRST_TIME_OPTION: (u32, u32) = (8, 0);
pub const LAST_TIME_OPTION: (u32, u32) = (18, 30);
pub const TIME_OPTION_STEP_MINUTES: i64 = 30;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinicagenda=info"
}
