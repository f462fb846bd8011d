//! Derived-status calculators
//!
//! Pure functions computing display state from record timestamps and
//! enumerated statuses. Nothing here is persisted or cached; values are
//! recomputed on every read.

pub mod badge;
pub mod calibration;
pub mod duration;

pub use badge::{BadgeTone, StatusBadge};
pub use calibration::{
    calibration_status, default_warning_window, warning_window, CalibrationBucket,
    CalibrationStatus, DEFAULT_WARNING_DAYS, MAX_WARNING_DAYS,
};
pub use duration::{usage_duration, UsageDuration};
