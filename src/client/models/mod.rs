//! Blog API data models
//!
//! This module contains the domain types exchanged with the blog backend.
//! Models are organized by resource type for easy discovery.

mod auth;
mod category;
mod post;
mod tag;
mod user;

// Re-export all models for convenient access
pub use auth::{LoginRequest, RegisterRequest, TokenPair, TokenResponse};
pub use category::{Category, CreateCategoryRequest};
pub use post::{Post, PostFilter, PostRequest, PostStatus};
pub use tag::{CreateTagsRequest, Tag};
pub use user::User;
