//! In-memory lab backend speaking the REST contract the gateway expects

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
struct BackendState {
    records: HashMap<String, Vec<Value>>,
    next_id: i64,
    fail_next: Option<(StatusCode, Value)>,
    calls: usize,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 100;
        backend
    }

    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .records
            .insert(resource.to_string(), records);
    }

    /// Make the next authorized call fail with the given status and body
    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().fail_next = Some((status, body));
    }

    /// Number of requests received
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Serve on an ephemeral port and return the API base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/:resource", get(list).post(create))
            .route("/api/:resource/:id", get(fetch).put(update).delete(remove))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    /// Count the call, check the bearer token and consume an injected failure
    fn admit(&self, headers: &HeaderMap) -> Result<(), Response> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false);
        if !authorized {
            return Err((StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid token" }))).into_response());
        }
        match state.fail_next.take() {
            Some((status, body)) => Err((status, Json(body)).into_response()),
            None => Ok(()),
        }
    }
}

fn matches(value: &Value, expected: &str) -> bool {
    match value {
        Value::Number(n) => n.to_string() == expected,
        Value::String(s) => s == expected,
        _ => false,
    }
}

fn not_found(resource: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} {} not found", resource, id) })),
    )
        .into_response()
}

async fn list(
    State(backend): State<FakeBackend>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = backend.admit(&headers) {
        return response;
    }
    let records: Vec<Value> = backend
        .records(&resource)
        .into_iter()
        .filter(|record| params.iter().all(|(k, v)| matches(&record[k.as_str()], v)))
        .collect();
    // samples come wrapped in an envelope, everything else as a bare array
    if resource == "samples" {
        Json(json!({ "data": records, "total": records.len() })).into_response()
    } else {
        Json(Value::Array(records)).into_response()
    }
}

async fn fetch(
    State(backend): State<FakeBackend>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = backend.admit(&headers) {
        return response;
    }
    match backend.records(&resource).into_iter().find(|r| matches(&r["id"], &id)) {
        Some(record) => Json(record).into_response(),
        None => not_found(&resource, &id),
    }
}

async fn create(
    State(backend): State<FakeBackend>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(response) = backend.admit(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    state.next_id += 1;
    body["id"] = json!(state.next_id);
    state
        .records
        .entry(resource)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
    State(backend): State<FakeBackend>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = backend.admit(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    let Some(record) = state
        .records
        .get_mut(&resource)
        .and_then(|records| records.iter_mut().find(|r| matches(&r["id"], &id)))
    else {
        return not_found(&resource, &id);
    };
    if let (Value::Object(target), Value::Object(changes)) = (&mut *record, body) {
        target.extend(changes);
    }
    Json(record.clone()).into_response()
}

async fn remove(
    State(backend): State<FakeBackend>,
    Path((resource, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = backend.admit(&headers) {
        return response;
    }
    let mut state = backend.state.lock().unwrap();
    let records = state.records.entry(resource.clone()).or_default();
    let before = records.len();
    records.retain(|r| !matches(&r["id"], &id));
    if records.len() == before {
        return not_found(&resource, &id);
    }
    StatusCode::NO_CONTENT.into_response()
}
