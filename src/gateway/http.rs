//! HTTP/JSON implementation of the gateway

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use uuid::Uuid;

use super::{Gateway, ListFilter, RequestContext};
use crate::{
    config::GatewayConfig,
    error::{AppError, AppResult, GENERIC_GATEWAY_ERROR},
    models::RecordId,
};

const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway client from configuration
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("labstore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Gateway(format!("Failed to create HTTP client: {}", e)))?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> AppResult<Self> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| AppError::Gateway(format!("Invalid gateway URL {}: {}", base_url, e)))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Each part is pushed as its own percent-encoded path segment, so an id
    /// can never address a different resource.
    fn url(&self, resource: &str, id: Option<&RecordId>) -> AppResult<Url> {
        let id = id.map(RecordId::to_string);
        // `PathSegmentsMut` silently drops dot segments
        if let Some(dots @ ("." | "..")) = id.as_deref() {
            return Err(AppError::Validation(format!("Invalid record id: {}", dots)));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::Gateway(format!("Gateway URL {} cannot hold a path", self.base_url))
            })?;
            segments.pop_if_empty().push(resource);
            if let Some(id) = &id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, ctx: &RequestContext, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        if let Some(credential) = ctx.credential() {
            builder = builder.bearer_auth(credential.expose());
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %url, %request_id, error = %e, "Gateway transport failure");
            AppError::from(e)
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, %request_id, status = status.as_u16(), "Gateway call");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(error_for_status(status, &body))
        }
    }

    async fn send_json(&self, builder: RequestBuilder) -> AppResult<Value> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list(
        &self,
        ctx: &RequestContext,
        resource: &str,
        filter: &ListFilter,
    ) -> AppResult<Vec<Value>> {
        let mut url = self.url(resource, None)?;
        if !filter.is_empty() {
            url.query_pairs_mut().extend_pairs(filter.params());
        }
        let body = self.send_json(self.request(ctx, Method::GET, url)).await?;
        unwrap_list(body)
    }

    async fn get(&self, ctx: &RequestContext, resource: &str, id: &RecordId) -> AppResult<Value> {
        let url = self.url(resource, Some(id))?;
        let body = self.send_json(self.request(ctx, Method::GET, url)).await?;
        unwrap_record(body)
    }

    async fn create(&self, ctx: &RequestContext, resource: &str, body: Value) -> AppResult<Value> {
        let url = self.url(resource, None)?;
        let builder = self.request(ctx, Method::POST, url).json(&body);
        unwrap_record(self.send_json(builder).await?)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        resource: &str,
        id: &RecordId,
        body: Value,
    ) -> AppResult<Value> {
        let url = self.url(resource, Some(id))?;
        let builder = self.request(ctx, Method::PUT, url).json(&body);
        unwrap_record(self.send_json(builder).await?)
    }

    async fn delete(&self, ctx: &RequestContext, resource: &str, id: &RecordId) -> AppResult<()> {
        let url = self.url(resource, Some(id))?;
        self.send(self.request(ctx, Method::DELETE, url)).await?;
        Ok(())
    }
}

/// Map a non-2xx response to the error taxonomy
pub fn error_for_status(status: StatusCode, body: &[u8]) -> AppError {
    let message = error_message(body)
        .unwrap_or_else(|| format!("{} with status {}", GENERIC_GATEWAY_ERROR, status.as_u16()));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Authentication(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Gateway(message),
    }
}

/// Extract the human-readable `message` (or `error`) field of an error body
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
}

/// Accept a bare array or a `{ "data": [...] }` envelope
pub fn unwrap_list(body: Value) -> AppResult<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(AppError::Gateway(
                "Invalid response body: expected a list of records".to_string(),
            )),
        },
        _ => Err(AppError::Gateway(
            "Invalid response body: expected a list of records".to_string(),
        )),
    }
}

/// Accept a bare record or a `{ "data": {...} }` envelope.
/// An object carrying its own `id` is always taken as the record itself.
pub fn unwrap_record(body: Value) -> AppResult<Value> {
    match body {
        Value::Object(mut map) if !map.contains_key("id") => match map.remove("data") {
            Some(record @ Value::Object(_)) => Ok(record),
            Some(other) => {
                map.insert("data".to_string(), other);
                Ok(Value::Object(map))
            }
            None => Ok(Value::Object(map)),
        },
        record @ Value::Object(_) => Ok(record),
        _ => Err(AppError::Gateway(
            "Invalid response body: expected a record".to_string(),
        )),
    }
}
