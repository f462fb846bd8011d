//! Sample-specific getters

use super::EntityStore;
use crate::{
    derived::StatusBadge,
    models::{RecordId, Sample, SampleStatus},
};

impl EntityStore<Sample> {
    pub fn status_badge(&self, id: &RecordId) -> Option<StatusBadge> {
        self.get(id).map(|sample| StatusBadge::from(sample.status))
    }

    pub fn by_status(&self, status: SampleStatus) -> Vec<Sample> {
        self.find(|sample| sample.status == status)
    }
}
