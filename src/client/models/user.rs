//! User models

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}
