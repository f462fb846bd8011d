//! Error types for labstore

use thiserror::Error;

/// Generic message used when the gateway returns an error body without
/// a `message` or `error` field.
pub const GENERIC_GATEWAY_ERROR: &str = "Request failed";

/// Message for a create/update missing a mandatory field. Reported ahead of
/// any other rule the same payload breaks.
pub const REQUIRED_FIELDS_MISSING: &str = "required fields missing";

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Local, pre-network rejection of a payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gateway rejected the credential (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Operation targeted an id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response, transport or decode failure
    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl AppError {
    /// Bare message, without the category prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Authentication(msg)
            | AppError::NotFound(msg)
            | AppError::Gateway(msg) => msg,
        }
    }

    /// Whether the caller should trigger re-authentication
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        let message = messages
            .iter()
            .find(|m| m.as_str() == REQUIRED_FIELDS_MISSING)
            .or_else(|| messages.first())
            .cloned()
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Gateway(format!("Request timed out: {}", err))
        } else {
            AppError::Gateway(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Gateway(format!("Invalid response body: {}", err))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
