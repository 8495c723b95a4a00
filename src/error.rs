//! Error types for the blogop CLI

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for blogop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not signed in. Run `blogop login` first.")]
    NotAuthenticated,

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors.
///
/// Cloneable so a single refresh outcome can be handed to every request
/// queued behind it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Token refresh failed or no refresh token was available
    #[error("Session expired: {0}. Run `blogop login` to sign in again.")]
    AuthExpired(String),

    /// A success response whose body could not be decoded
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of a backend error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend(err) => Some(err.status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Normalized backend error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub status: u16,
    pub message: String,
    pub field_errors: BTreeMap<String, String>,
}

/// Keys tried, in order, for the human-readable message
const MESSAGE_KEYS: [&str; 2] = ["message", "error"];
/// Keys tried, in order, for per-field validation messages
const FIELD_ERROR_KEYS: [&str; 2] = ["errors", "fieldErrors"];

impl BackendError {
    /// Build a normalized error from a response status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback = || {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        };

        if body.trim().is_empty() {
            return Self {
                status: status.as_u16(),
                message: fallback(),
                field_errors: BTreeMap::new(),
            };
        }

        // Fields are read individually; a malformed one is skipped
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return Self {
                status: status.as_u16(),
                message: body.trim().to_string(),
                field_errors: BTreeMap::new(),
            };
        };

        let message = MESSAGE_KEYS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_string)
            .unwrap_or_else(fallback);

        let field_errors = FIELD_ERROR_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_object))
            .map(|fields| {
                fields
                    .iter()
                    .map(|(field, msg)| {
                        let text = msg.as_str().map(str::to_string);
                        (field.clone(), text.unwrap_or_else(|| msg.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status: map
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(status.as_u16()),
            message,
            field_errors,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            401 => write!(f, "Unauthorized ({}): {}", self.status, self.message)?,
            403 => write!(f, "Access denied ({}): {}", self.status, self.message)?,
            404 => write!(f, "Not found ({}): {}", self.status, self.message)?,
            s if s >= 500 => write!(f, "Server error ({}): {}", s, self.message)?,
            s => write!(f, "Request failed ({}): {}", s, self.message)?,
        }
        for (field, message) in &self.field_errors {
            write!(f, "\n  - {}: {}", field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
