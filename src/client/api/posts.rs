//! Post API trait

use async_trait::async_trait;

use crate::client::models::{Post, PostFilter, PostRequest};
use crate::error::Result;

/// Post and draft operations for the blog API
#[async_trait]
pub trait PostApi: Send + Sync {
    /// List published posts, optionally filtered by category and tag.
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>>;

    async fn get_post(&self, id: &str) -> Result<Post>;

    /// List the signed-in user's drafts.
    async fn list_drafts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, request: &PostRequest) -> Result<Post>;

    /// Replace a post's title, content, category, tags and status.
    async fn update_post(&self, id: &str, request: &PostRequest) -> Result<Post>;

    async fn delete_post(&self, id: &str) -> Result<()>;
}
