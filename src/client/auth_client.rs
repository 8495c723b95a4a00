//! Calls to the `/auth` endpoints that must bypass 401 interception
//!
//! Login, registration, refresh and logout either create credentials or
//! dispose of them, so a 401 from any of them is final rather than a reason
//! to refresh.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;

use super::models::{LoginRequest, RegisterRequest, TokenPair, TokenResponse};
use super::refresh::TokenRefresher;
use crate::error::{ApiError, BackendError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
}

/// Raw client for the credential endpoints
#[derive(Clone)]
pub struct AuthClient {
    http: HttpClient,
    base_url: String,
}

impl AuthClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenPair, ApiError> {
        self.issue_tokens("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenPair, ApiError> {
        self.issue_tokens("/auth/register", request).await
    }

    /// Revoke `refresh_token` server-side.
    pub async fn logout(
        &self,
        refresh_token: &str,
        authorization: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/auth/logout", self.base_url);
        let mut builder = self
            .http
            .post(&url)
            .json(&RefreshTokenRequest { refresh_token });
        if let Some(auth) = authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::from_response(status, &body).into())
    }

    async fn issue_tokens<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenPair, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(BackendError::from_response(status, &text).into());
        }

        let tokens: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        Ok(tokens.into_pair(Utc::now()))
    }
}

#[async_trait]
impl TokenRefresher for AuthClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.issue_tokens("/auth/refresh-token", &RefreshTokenRequest { refresh_token })
            .await
    }
}
