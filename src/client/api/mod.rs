//! API trait definitions split by responsibility
//!
//! This module organizes the blog API surface into focused sub-traits:
//! - [`AuthApi`] - Sign-in, registration and session operations
//! - [`PostApi`] - Posts and drafts
//! - [`CategoryApi`] - Categories
//! - [`TagApi`] - Tags

mod auth;
mod categories;
mod posts;
mod tags;

pub use auth::AuthApi;
pub use categories::CategoryApi;
pub use posts::PostApi;
pub use tags::TagApi;
