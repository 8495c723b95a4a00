//! Tag API trait

use async_trait::async_trait;

use crate::client::models::Tag;
use crate::error::Result;

/// Tag operations for the blog API
#[async_trait]
pub trait TagApi: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Create tags in bulk; names that already exist are returned as-is.
    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>>;

    async fn delete_tag(&self, id: &str) -> Result<()>;
}
