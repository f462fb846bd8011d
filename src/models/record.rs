//! Record identity and the per-kind record contract

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;

/// Opaque record identifier assigned by the gateway.
///
/// Backends hand out either integer keys or string keys (uuids, slugs); the
/// original wire form is kept so that it round-trips unchanged in paths and
/// foreign-key fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(v) => write!(f, "{}", v),
            RecordId::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        RecordId::Int(v)
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        RecordId::Text(v.to_string())
    }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self {
        RecordId::Text(v)
    }
}

/// Contract shared by every entity kind held in an
/// [`EntityStore`](crate::store::EntityStore).
pub trait Record:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Payload sent to `POST /<resource>`
    type Create: Validate + Serialize + Send + Sync;
    /// Partial payload sent to `PUT /<resource>/:id`
    type Update: Validate + Serialize + Send + Sync;

    /// Path segment of the collection on the gateway
    const RESOURCE: &'static str;
    /// Human-readable kind, used in error messages
    const KIND: &'static str;

    fn id(&self) -> &RecordId;

    fn validate_create(data: &Self::Create) -> AppResult<()> {
        data.validate()?;
        Ok(())
    }

    /// Validate an update against the currently stored record.
    fn validate_update(&self, data: &Self::Update) -> AppResult<()> {
        data.validate()?;
        Ok(())
    }
}
