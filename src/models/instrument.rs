//! Instrument model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    enums::InstrumentStatus,
    record::{Record, RecordId},
    timestamp,
};

/// Instrument record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: RecordId,
    pub name: String,
    pub serial_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub status: InstrumentStatus,
    /// Date the next calibration is due
    #[serde(default, with = "timestamp::option")]
    pub calibration_date: Option<DateTime<Utc>>,
    /// Free-form schedule, e.g. "monthly"
    #[serde(default)]
    pub maintenance_schedule: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<RecordId>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create instrument request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateInstrument {
    #[validate(
        required(message = "required fields missing"),
        length(min = 1, message = "required fields missing")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(
        required(message = "required fields missing"),
        length(min = 1, message = "required fields missing")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InstrumentStatus>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub calibration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update instrument request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateInstrument {
    #[validate(length(min = 1, message = "required fields missing"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "required fields missing"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InstrumentStatus>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub calibration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Instrument {
    type Create = CreateInstrument;
    type Update = UpdateInstrument;

    const RESOURCE: &'static str = "instruments";
    const KIND: &'static str = "Instrument";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
