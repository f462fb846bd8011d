//! Supplier model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::record::{Record, RecordId};

/// Supplier record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create supplier request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSupplier {
    #[validate(
        required(message = "required fields missing"),
        length(min = 1, message = "required fields missing")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update supplier request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSupplier {
    #[validate(length(min = 1, message = "required fields missing"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Supplier {
    type Create = CreateSupplier;
    type Update = UpdateSupplier;

    const RESOURCE: &'static str = "suppliers";
    const KIND: &'static str = "Supplier";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
