//! Usage session duration

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Elapsed time of a closed usage session, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct UsageDuration(pub i64);

impl UsageDuration {
    pub fn seconds(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UsageDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.0.max(0);
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        write!(f, "{}h {}m {}s", h, m, s)
    }
}

/// Duration of a usage session, or `None` while it is still open.
///
/// Reversed windows are rejected when the log is written, so the result is
/// non-negative for any persisted record.
pub fn usage_duration(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
) -> Option<UsageDuration> {
    end_time.map(|end| UsageDuration((end - start_time).num_seconds()))
}
