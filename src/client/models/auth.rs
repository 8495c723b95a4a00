//! Authentication models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Credentials for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account details for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token payload returned by login, register and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    /// Anchor the relative expiry to `received_at`.
    pub fn into_pair(self, received_at: DateTime<Utc>) -> TokenPair {
        TokenPair {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            expires_at: received_at + Duration::seconds(self.expires_in),
        }
    }
}

/// Persisted access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Whether the access token has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
