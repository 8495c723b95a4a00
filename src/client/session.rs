//! Authentication session state
//!
//! [`AuthSession`] tracks whether the user is signed in and who they are.
//! [`SessionSink`] is how the client tells the surrounding application that
//! a session ended involuntarily, so the application can notify the user and
//! send them back to login.

use std::sync::RwLock;

use super::models::User;
use crate::error::ApiError;

/// Receives authentication lifecycle signals from the client.
pub trait SessionSink: Send + Sync {
    /// Raised once per failed refresh cycle, right after tokens are cleared.
    fn auth_failed(&self, error: &ApiError);

    /// Raised after the grace delay that follows [`SessionSink::auth_failed`].
    fn redirect_to_login(&self);
}

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

/// Authentication flag and user record for one client instance.
#[derive(Debug, Default)]
pub struct AuthSession {
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.snapshot().user
    }

    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// Mark signed in, optionally with the user record.
    pub fn sign_in(&self, user: Option<User>) {
        if let Ok(mut state) = self.state.write() {
            state.is_authenticated = true;
            state.user = user;
        }
    }

    /// Tear the session down.
    pub fn sign_out(&self) {
        if let Ok(mut state) = self.state.write() {
            *state = SessionState::default();
        }
    }
}
