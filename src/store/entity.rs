//! Generic entity store
//!
//! An [`EntityStore`] owns the in-memory collection of one record kind and
//! is the only component that calls the gateway for it. Writes follow a
//! replace-on-success policy: local data changes only once the gateway has
//! acknowledged the call, and a failed call leaves the collection as it was.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Duration;
use serde_json::Value;

use super::{
    confirmation::Confirmation,
    request_state::{OperationClass, RequestState, RequestStates},
};
use crate::{
    config::{ListPolicy, StoreConfig},
    derived::{default_warning_window, warning_window},
    error::{AppError, AppResult},
    gateway::{Gateway, ListFilter, RequestContext},
    models::{Record, RecordId},
};

/// Per-store behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub list_policy: ListPolicy,
    pub calibration_window: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            list_policy: ListPolicy::default(),
            calibration_window: default_warning_window(),
        }
    }
}

impl From<&StoreConfig> for StoreOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            list_policy: config.list_policy,
            calibration_window: warning_window(config.calibration_warning_days),
        }
    }
}

struct Inner<R> {
    collection: Vec<R>,
    requests: RequestStates,
    /// Bumped by every collection-replacing request and by `clear`
    generation: u64,
}

impl<R> Default for Inner<R> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            requests: RequestStates::default(),
            generation: 0,
        }
    }
}

pub struct EntityStore<R: Record> {
    gateway: Arc<dyn Gateway>,
    inner: Arc<RwLock<Inner<R>>>,
    options: StoreOptions,
}

impl<R: Record> Clone for EntityStore<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            inner: Arc::clone(&self.inner),
            options: self.options,
        }
    }
}

impl<R: Record> EntityStore<R> {
    pub fn new(gateway: Arc<dyn Gateway>, options: StoreOptions) -> Self {
        Self {
            gateway,
            inner: Arc::new(RwLock::new(Inner::default())),
            options,
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // -----------------------------------------------------------------------
    // Getters (no network activity)
    // -----------------------------------------------------------------------

    /// Snapshot of the current collection, in insertion order
    pub fn collection(&self) -> Vec<R> {
        self.read().collection.clone()
    }

    pub fn get(&self, id: &RecordId) -> Option<R> {
        self.read().collection.iter().find(|r| r.id() == id).cloned()
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.read().collection.iter().position(|r| r.id() == id)
    }

    /// Records matching `predicate`. The predicate runs on a snapshot, after
    /// the lock is released, so it may call back into this store.
    pub fn find<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        let snapshot = self.collection();
        snapshot.into_iter().filter(|r| predicate(r)).collect()
    }

    pub fn len(&self) -> usize {
        self.read().collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().collection.is_empty()
    }

    pub fn request_state(&self, class: OperationClass) -> RequestState {
        self.read().requests.get(class)
    }

    pub fn is_loading(&self) -> bool {
        self.read().requests.any_loading()
    }

    // -----------------------------------------------------------------------
    // Gateway operations
    // -----------------------------------------------------------------------

    /// Fetch the collection and replace the local copy with the response.
    ///
    /// On failure the previous collection stays available.
    pub async fn list(&self, ctx: &RequestContext, filter: &ListFilter) -> AppResult<Vec<R>> {
        self.replace_from(ctx, OperationClass::List, filter).await
    }

    pub(crate) async fn replace_from(
        &self,
        ctx: &RequestContext,
        class: OperationClass,
        filter: &ListFilter,
    ) -> AppResult<Vec<R>> {
        let generation = {
            let mut inner = self.write();
            inner.generation += 1;
            inner.requests.begin(class);
            inner.generation
        };

        let result = self
            .gateway
            .list(ctx, R::RESOURCE, filter)
            .await
            .and_then(decode_all::<R>);

        let mut inner = self.write();
        if self.options.list_policy == ListPolicy::LatestRequest && generation != inner.generation {
            tracing::trace!(kind = R::KIND, ?class, generation, "Discarding superseded response");
            return result;
        }
        match result {
            Ok(records) => {
                inner.collection = records.clone();
                inner.requests.succeed(class);
                Ok(records)
            }
            Err(e) => {
                inner.requests.fail(class, &e);
                Err(e)
            }
        }
    }

    /// Re-fetch one record, replacing it in place (or appending it if the
    /// collection does not hold it yet).
    pub async fn refresh(&self, ctx: &RequestContext, id: &RecordId) -> AppResult<R> {
        self.write().requests.begin(OperationClass::Fetch);

        let result = self
            .gateway
            .get(ctx, R::RESOURCE, id)
            .await
            .and_then(decode::<R>);

        let mut inner = self.write();
        match result {
            Ok(record) => {
                upsert(&mut inner.collection, record.clone());
                inner.requests.succeed(OperationClass::Fetch);
                Ok(record)
            }
            Err(e) => {
                inner.requests.fail(OperationClass::Fetch, &e);
                Err(e)
            }
        }
    }

    /// Validate and create a record; the stored form returned by the gateway
    /// is appended to the collection.
    pub async fn create(&self, ctx: &RequestContext, data: R::Create) -> AppResult<R> {
        if let Err(e) = R::validate_create(&data) {
            return Err(self.reject(e));
        }
        let body = encode(&data).map_err(|e| self.reject(e))?;

        self.write().requests.begin(OperationClass::Mutation);

        let result = self
            .gateway
            .create(ctx, R::RESOURCE, body)
            .await
            .and_then(decode::<R>);

        let mut inner = self.write();
        match result {
            Ok(record) => {
                upsert(&mut inner.collection, record.clone());
                inner.requests.succeed(OperationClass::Mutation);
                Ok(record)
            }
            Err(e) => {
                inner.requests.fail(OperationClass::Mutation, &e);
                Err(e)
            }
        }
    }

    /// Update a record held in the collection; the entry is replaced in
    /// place with the gateway's response.
    pub async fn update(&self, ctx: &RequestContext, id: &RecordId, data: R::Update) -> AppResult<R> {
        let existing = self
            .get(id)
            .ok_or_else(|| self.reject(not_found::<R>(id)))?;
        if let Err(e) = existing.validate_update(&data) {
            return Err(self.reject(e));
        }
        let body = encode(&data).map_err(|e| self.reject(e))?;

        self.write().requests.begin(OperationClass::Mutation);

        let result = self
            .gateway
            .update(ctx, R::RESOURCE, id, body)
            .await
            .and_then(decode::<R>);

        let mut inner = self.write();
        match result {
            Ok(record) => {
                // A list that resolved meanwhile may have dropped the entry
                if let Some(slot) = inner.collection.iter_mut().find(|r| r.id() == id) {
                    *slot = record.clone();
                }
                inner.requests.succeed(OperationClass::Mutation);
                Ok(record)
            }
            Err(e) => {
                inner.requests.fail(OperationClass::Mutation, &e);
                Err(e)
            }
        }
    }

    /// Delete a record. The entry leaves the collection only after the
    /// gateway acknowledged the deletion.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: &RecordId,
        _confirmation: Confirmation,
    ) -> AppResult<()> {
        if self.position(id).is_none() {
            return Err(self.reject(not_found::<R>(id)));
        }

        self.write().requests.begin(OperationClass::Mutation);

        let result = self.gateway.delete(ctx, R::RESOURCE, id).await;

        let mut inner = self.write();
        match result {
            Ok(()) => {
                inner.collection.retain(|r| r.id() != id);
                inner.requests.succeed(OperationClass::Mutation);
                Ok(())
            }
            Err(e) => {
                inner.requests.fail(OperationClass::Mutation, &e);
                Err(e)
            }
        }
    }

    /// Release the collection when its consumer goes away. Nothing is
    /// deleted remotely.
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.collection.clear();
        inner.requests.reset();
        inner.generation += 1;
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Record a local, pre-network failure on the mutation class
    fn reject(&self, error: AppError) -> AppError {
        self.write().requests.fail(OperationClass::Mutation, &error);
        error
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<R>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found<R: Record>(id: &RecordId) -> AppError {
    AppError::NotFound(format!("{} {} not found", R::KIND, id))
}

fn upsert<R: Record>(collection: &mut Vec<R>, record: R) {
    match collection.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => collection.push(record),
    }
}

fn encode<T: serde::Serialize>(data: &T) -> AppResult<Value> {
    serde_json::to_value(data)
        .map_err(|e| AppError::Validation(format!("Failed to encode payload: {}", e)))
}

fn decode<R: Record>(value: Value) -> AppResult<R> {
    Ok(serde_json::from_value(value)?)
}

fn decode_all<R: Record>(values: Vec<Value>) -> AppResult<Vec<R>> {
    values.into_iter().map(decode::<R>).collect()
}
