//! Sample model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    enums::SampleStatus,
    record::{Record, RecordId},
    timestamp,
};

/// Sample record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub sample_type_id: Option<RecordId>,
    #[serde(default)]
    pub source_id: Option<RecordId>,
    #[serde(default)]
    pub storage_location_id: Option<RecordId>,
    #[serde(default)]
    pub status: SampleStatus,
    #[serde(default, with = "timestamp::option")]
    pub collection_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create sample request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSample {
    #[validate(
        required(message = "required fields missing"),
        length(min = 1, message = "required fields missing")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_type_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SampleStatus>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update sample request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSample {
    #[validate(length(min = 1, message = "required fields missing"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_type_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SampleStatus>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Sample {
    type Create = CreateSample;
    type Update = UpdateSample;

    const RESOURCE: &'static str = "samples";
    const KIND: &'static str = "Sample";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
