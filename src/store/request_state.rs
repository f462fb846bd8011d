//! Request lifecycle tracking

use std::collections::HashMap;

use serde::Serialize;

use crate::error::AppError;

/// Lifecycle of the latest request in one operation class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Logical operation classes, each tracked by its own [`RequestState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationClass {
    /// Collection fetch
    List,
    /// Single record refresh
    Fetch,
    /// Create, update and delete
    Mutation,
    /// Per-instrument usage log fetch
    InstrumentUsage,
}

/// One [`RequestState`] per class. A new request overwrites the tracking
/// of the previous one in the same class; nothing is queued.
#[derive(Debug, Clone, Default)]
pub struct RequestStates {
    states: HashMap<OperationClass, RequestState>,
}

impl RequestStates {
    pub fn get(&self, class: OperationClass) -> RequestState {
        self.states.get(&class).cloned().unwrap_or_default()
    }

    pub fn any_loading(&self) -> bool {
        self.states.values().any(RequestState::is_loading)
    }

    pub fn begin(&mut self, class: OperationClass) {
        self.set(class, RequestState::Loading);
    }

    pub fn succeed(&mut self, class: OperationClass) {
        self.set(class, RequestState::Success);
    }

    pub fn fail(&mut self, class: OperationClass, error: &AppError) {
        self.set(class, RequestState::Error(error.message().to_string()));
    }

    pub fn reset(&mut self) {
        self.states.clear();
    }

    fn set(&mut self, class: OperationClass, state: RequestState) {
        tracing::trace!(?class, ?state, "Request state transition");
        self.states.insert(class, state);
    }
}
