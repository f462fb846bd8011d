//! Calibration urgency

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Days ahead of the due date at which an instrument enters the warning bucket
pub const DEFAULT_WARNING_DAYS: i64 = 7;
/// Upper bound accepted for a configured warning window (ten years)
pub const MAX_WARNING_DAYS: i64 = 3650;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

pub fn default_warning_window() -> Duration {
    Duration::days(DEFAULT_WARNING_DAYS)
}

/// Warning window for a configured number of days, clamped to
/// `1..=MAX_WARNING_DAYS`
pub fn warning_window(days: i64) -> Duration {
    Duration::days(days.clamp(1, MAX_WARNING_DAYS))
}

/// Urgency bucket, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationBucket {
    Overdue,
    Warning,
    Ok,
    Unknown,
}

impl std::fmt::Display for CalibrationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CalibrationBucket::Overdue => "Overdue",
            CalibrationBucket::Warning => "Due soon",
            CalibrationBucket::Ok => "OK",
            CalibrationBucket::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalibrationStatus {
    pub bucket: CalibrationBucket,
    pub hint: Option<String>,
}

impl CalibrationStatus {
    pub fn needs_attention(&self) -> bool {
        matches!(
            self.bucket,
            CalibrationBucket::Overdue | CalibrationBucket::Warning
        )
    }
}

/// Bucket a calibration due date relative to `now`.
///
/// A due date equal to `now` is overdue; one exactly `window` ahead is
/// still in the warning bucket.
pub fn calibration_status(
    calibration_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> CalibrationStatus {
    let Some(due) = calibration_date else {
        return CalibrationStatus {
            bucket: CalibrationBucket::Unknown,
            hint: None,
        };
    };

    if due <= now {
        CalibrationStatus {
            bucket: CalibrationBucket::Overdue,
            hint: Some(format!("Overdue by {}", humanize_span(now - due))),
        }
    } else if now.checked_add_signed(window).map_or(true, |limit| due <= limit) {
        CalibrationStatus {
            bucket: CalibrationBucket::Warning,
            hint: Some(format!("Due in {}", humanize_span(due - now))),
        }
    } else {
        CalibrationStatus {
            bucket: CalibrationBucket::Ok,
            hint: None,
        }
    }
}

/// Render a span truncated to its largest whole unit ("5days", "3h", "12m").
pub fn humanize_span(span: Duration) -> String {
    let secs = span.num_seconds().max(0) as u64;
    let coarse = if secs >= DAY {
        secs / DAY * DAY
    } else if secs >= HOUR {
        secs / HOUR * HOUR
    } else if secs >= MINUTE {
        secs / MINUTE * MINUTE
    } else {
        secs
    };
    humantime::format_duration(std::time::Duration::from_secs(coarse)).to_string()
}
