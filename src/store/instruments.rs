//! Instrument-specific getters

use chrono::{DateTime, Utc};

use super::EntityStore;
use crate::{
    derived::{calibration_status, CalibrationStatus, StatusBadge},
    models::{Instrument, RecordId},
};

impl EntityStore<Instrument> {
    /// Calibration urgency of one instrument, `None` if it is not held
    pub fn calibration_status(&self, id: &RecordId, now: DateTime<Utc>) -> Option<CalibrationStatus> {
        self.get(id).map(|instrument| self.calibration_of(&instrument, now))
    }

    pub fn calibration_of(&self, instrument: &Instrument, now: DateTime<Utc>) -> CalibrationStatus {
        calibration_status(instrument.calibration_date, now, self.options().calibration_window)
    }

    /// Every instrument with its calibration status, in collection order
    pub fn calibration_report(&self, now: DateTime<Utc>) -> Vec<(Instrument, CalibrationStatus)> {
        self.collection()
            .into_iter()
            .map(|instrument| {
                let status = self.calibration_of(&instrument, now);
                (instrument, status)
            })
            .collect()
    }

    /// Overdue and soon-due instruments, most urgent first
    pub fn calibration_due(&self, now: DateTime<Utc>) -> Vec<(Instrument, CalibrationStatus)> {
        let mut due: Vec<_> = self
            .calibration_report(now)
            .into_iter()
            .filter(|(_, status)| status.needs_attention())
            .collect();
        due.sort_by(|(a, sa), (b, sb)| {
            sa.bucket
                .cmp(&sb.bucket)
                .then_with(|| a.calibration_date.cmp(&b.calibration_date))
        });
        due
    }

    pub fn status_badge(&self, id: &RecordId) -> Option<StatusBadge> {
        self.get(id).map(|instrument| StatusBadge::from(instrument.status))
    }
}
