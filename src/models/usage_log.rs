//! Instrument usage log model
//!
//! A usage log with no `end_time` is an in-progress session.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{
    record::{Record, RecordId},
    timestamp,
};
use crate::error::{AppError, AppResult};

pub const END_BEFORE_START: &str = "end_time before start_time";

/// Usage log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    pub id: RecordId,
    pub instrument_id: RecordId,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UsageLog {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Create usage log request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateUsageLog {
    #[validate(required(message = "required fields missing"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<RecordId>,
    #[validate(required(message = "required fields missing"))]
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update usage log request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateUsageLog {
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn window_error() -> ValidationError {
    let mut error = ValidationError::new("time_range");
    error.message = Some(Cow::Borrowed(END_BEFORE_START));
    error
}

fn check_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(window_error()),
        _ => Ok(()),
    }
}

fn validate_create_window(data: &CreateUsageLog) -> Result<(), ValidationError> {
    check_window(data.start_time, data.end_time)
}

fn validate_update_window(data: &UpdateUsageLog) -> Result<(), ValidationError> {
    check_window(data.start_time, data.end_time)
}

impl Record for UsageLog {
    type Create = CreateUsageLog;
    type Update = UpdateUsageLog;

    const RESOURCE: &'static str = "usage-logs";
    const KIND: &'static str = "Usage log";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate_create(data: &CreateUsageLog) -> AppResult<()> {
        // Range first: a reversed window is reported even if another field is missing
        check_window(data.start_time, data.end_time)
            .map_err(|_| AppError::Validation(END_BEFORE_START.to_string()))?;
        data.validate()?;
        Ok(())
    }

    /// The window is checked against the merged record, so closing a
    /// session with only `end_time` still compares to the stored start.
    fn validate_update(&self, data: &UpdateUsageLog) -> AppResult<()> {
        data.validate()?;
        let start = data.start_time.unwrap_or(self.start_time);
        let end = data.end_time.or(self.end_time);
        check_window(Some(start), end)
            .map_err(|_| AppError::Validation(END_BEFORE_START.to_string()))
    }
}
