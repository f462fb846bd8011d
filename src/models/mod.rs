//! Data models for labstore

pub mod enums;
pub mod instrument;
pub mod record;
pub mod sample;
pub mod supplier;
pub mod timestamp;
pub mod usage_log;

// Re-export commonly used types
pub use enums::{InstrumentStatus, SampleStatus};
pub use instrument::{CreateInstrument, Instrument, UpdateInstrument};
pub use record::{Record, RecordId};
pub use sample::{CreateSample, Sample, UpdateSample};
pub use supplier::{CreateSupplier, Supplier, UpdateSupplier};
pub use usage_log::{CreateUsageLog, UpdateUsageLog, UsageLog};
