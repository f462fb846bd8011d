//! Remote gateway access
//!
//! The gateway is the authoritative REST store. Stores talk to it only
//! through the [`Gateway`] trait, exchanging raw JSON so that one client
//! serves every record kind.

pub mod http;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::AppResult, models::RecordId};

pub use http::HttpGateway;

/// Opaque bearer credential supplied by the session component
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Per-call context passed explicitly to every gateway call
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    credential: Option<Credential>,
}

impl RequestContext {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}

/// Query-string filter for list calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    params: BTreeMap<String, String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// CRUD access to one REST collection per `resource` path segment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /<resource>[?filter]`
    async fn list(
        &self,
        ctx: &RequestContext,
        resource: &str,
        filter: &ListFilter,
    ) -> AppResult<Vec<Value>>;

    /// `GET /<resource>/:id`
    async fn get(&self, ctx: &RequestContext, resource: &str, id: &RecordId) -> AppResult<Value>;

    /// `POST /<resource>`, returning the stored record
    async fn create(&self, ctx: &RequestContext, resource: &str, body: Value) -> AppResult<Value>;

    /// `PUT /<resource>/:id`, returning the stored record
    async fn update(
        &self,
        ctx: &RequestContext,
        resource: &str,
        id: &RecordId,
        body: Value,
    ) -> AppResult<Value>;

    /// `DELETE /<resource>/:id`
    async fn delete(&self, ctx: &RequestContext, resource: &str, id: &RecordId) -> AppResult<()>;
}
