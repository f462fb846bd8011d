//! Status badges for presentation layers

use serde::Serialize;

use super::calibration::CalibrationBucket;
use crate::models::{InstrumentStatus, SampleStatus, UsageLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl StatusBadge {
    fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

impl From<InstrumentStatus> for StatusBadge {
    fn from(status: InstrumentStatus) -> Self {
        let tone = match status {
            InstrumentStatus::Available => BadgeTone::Success,
            InstrumentStatus::InUse => BadgeTone::Info,
            InstrumentStatus::Maintenance => BadgeTone::Warning,
            InstrumentStatus::OutOfService => BadgeTone::Danger,
            InstrumentStatus::Retired | InstrumentStatus::Unknown => BadgeTone::Neutral,
        };
        StatusBadge::new(status.to_string(), tone)
    }
}

impl From<SampleStatus> for StatusBadge {
    fn from(status: SampleStatus) -> Self {
        let tone = match status {
            SampleStatus::Available => BadgeTone::Success,
            SampleStatus::InUse => BadgeTone::Info,
            SampleStatus::Reserved => BadgeTone::Warning,
            SampleStatus::Depleted => BadgeTone::Danger,
            SampleStatus::Disposed | SampleStatus::Unknown => BadgeTone::Neutral,
        };
        StatusBadge::new(status.to_string(), tone)
    }
}

impl From<CalibrationBucket> for StatusBadge {
    fn from(bucket: CalibrationBucket) -> Self {
        let tone = match bucket {
            CalibrationBucket::Overdue => BadgeTone::Danger,
            CalibrationBucket::Warning => BadgeTone::Warning,
            CalibrationBucket::Ok => BadgeTone::Success,
            CalibrationBucket::Unknown => BadgeTone::Neutral,
        };
        StatusBadge::new(bucket.to_string(), tone)
    }
}

impl From<&UsageLog> for StatusBadge {
    fn from(log: &UsageLog) -> Self {
        if log.is_open() {
            StatusBadge::new("In progress", BadgeTone::Info)
        } else {
            StatusBadge::new("Completed", BadgeTone::Neutral)
        }
    }
}
