//! Entity stores
//!
//! One [`EntityStore`] per record kind, all sharing the request lifecycle
//! machine and the CRUD reconciliation contract.

pub mod confirmation;
pub mod entity;
pub mod instruments;
pub mod request_state;
pub mod samples;
pub mod usage_logs;

use std::sync::Arc;

use crate::{
    config::StoreConfig,
    gateway::Gateway,
    models::{Instrument, Sample, Supplier, UsageLog},
};

pub use confirmation::Confirmation;
pub use entity::{EntityStore, StoreOptions};
pub use request_state::{OperationClass, RequestState, RequestStates};

/// Container for all stores. Stores are independent; they only share the
/// gateway client.
#[derive(Clone)]
pub struct Stores {
    pub instruments: EntityStore<Instrument>,
    pub usage_logs: EntityStore<UsageLog>,
    pub samples: EntityStore<Sample>,
    pub suppliers: EntityStore<Supplier>,
}

impl Stores {
    /// Create all stores over the given gateway
    pub fn new(gateway: Arc<dyn Gateway>, config: &StoreConfig) -> Self {
        let options = StoreOptions::from(config);
        Self {
            instruments: EntityStore::new(gateway.clone(), options),
            usage_logs: EntityStore::new(gateway.clone(), options),
            samples: EntityStore::new(gateway.clone(), options),
            suppliers: EntityStore::new(gateway, options),
        }
    }

    /// Release every collection (end of session)
    pub fn clear_all(&self) {
        self.instruments.clear();
        self.usage_logs.clear();
        self.samples.clear();
        self.suppliers.clear();
    }
}
