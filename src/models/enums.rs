//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InstrumentStatus
// ---------------------------------------------------------------------------

/// Operational status of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstrumentStatus {
    #[default]
    Available,
    #[serde(rename = "In Use")]
    InUse,
    Maintenance,
    #[serde(rename = "Out of Service")]
    OutOfService,
    Retired,
    /// Any status value this client does not know about
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for InstrumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstrumentStatus::Available => "Available",
            InstrumentStatus::InUse => "In Use",
            InstrumentStatus::Maintenance => "Maintenance",
            InstrumentStatus::OutOfService => "Out of Service",
            InstrumentStatus::Retired => "Retired",
            InstrumentStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SampleStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SampleStatus {
    #[default]
    Available,
    #[serde(rename = "In Use")]
    InUse,
    Reserved,
    Depleted,
    Disposed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SampleStatus::Available => "Available",
            SampleStatus::InUse => "In Use",
            SampleStatus::Reserved => "Reserved",
            SampleStatus::Depleted => "Depleted",
            SampleStatus::Disposed => "Disposed",
            SampleStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}
