//! Usage-log operations: per-instrument fetch and session lifecycle

use chrono::{DateTime, Utc};

use super::{EntityStore, OperationClass};
use crate::{
    derived::{usage_duration, UsageDuration},
    error::{AppError, AppResult},
    gateway::{ListFilter, RequestContext},
    models::{CreateUsageLog, RecordId, UpdateUsageLog, UsageLog},
};

impl EntityStore<UsageLog> {
    /// Replace the collection with the usage logs of one instrument.
    /// Tracked separately from [`EntityStore::list`].
    pub async fn list_for_instrument(
        &self,
        ctx: &RequestContext,
        instrument_id: &RecordId,
    ) -> AppResult<Vec<UsageLog>> {
        let filter = ListFilter::new().with("instrument_id", instrument_id);
        self.replace_from(ctx, OperationClass::InstrumentUsage, &filter)
            .await
    }

    /// Record a usage session. Leaving `end_time` empty opens an
    /// in-progress session.
    pub async fn log_usage(&self, ctx: &RequestContext, data: CreateUsageLog) -> AppResult<UsageLog> {
        self.create(ctx, data).await
    }

    /// Close an in-progress session
    pub async fn end_session(
        &self,
        ctx: &RequestContext,
        id: &RecordId,
        end_time: DateTime<Utc>,
    ) -> AppResult<UsageLog> {
        let update = UpdateUsageLog {
            end_time: Some(end_time),
            ..Default::default()
        };
        self.update(ctx, id, update).await
    }

    pub fn open_sessions(&self) -> Vec<UsageLog> {
        self.find(UsageLog::is_open)
    }

    /// Duration of a held log; `Ok(None)` while the session is open
    pub fn duration(&self, id: &RecordId) -> AppResult<Option<UsageDuration>> {
        self.get(id)
            .map(|log| usage_duration(log.start_time, log.end_time))
            .ok_or_else(|| AppError::NotFound(format!("Usage log {} not found", id)))
    }

    /// Sum of closed sessions for one instrument; open sessions do not count
    pub fn total_usage(&self, instrument_id: &RecordId) -> UsageDuration {
        let seconds = self
            .find(|log| &log.instrument_id == instrument_id)
            .iter()
            .filter_map(|log| usage_duration(log.start_time, log.end_time))
            .map(|d| d.seconds())
            .sum();
        UsageDuration(seconds)
    }
}
