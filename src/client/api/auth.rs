//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::User;
use crate::client::session::SessionState;
use crate::error::Result;

/// Authentication operations for the blog API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in with email and password, storing the issued tokens.
    async fn login(&self, email: &str, password: &str) -> Result<SessionState>;

    /// Create an account and sign in with the issued tokens.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionState>;

    /// Revoke the refresh token and clear the local session.
    ///
    /// Completes locally, without a network call, when no refresh token is
    /// stored. Waits for an in-flight token refresh to settle first.
    async fn logout(&self) -> Result<()>;

    /// Fetch the user the current access token belongs to.
    async fn whoami(&self) -> Result<User>;
}
