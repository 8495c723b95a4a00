//! Category API trait

use async_trait::async_trait;

use crate::client::models::Category;
use crate::error::Result;

/// Category operations for the blog API
#[async_trait]
pub trait CategoryApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn create_category(&self, name: &str) -> Result<Category>;

    /// Delete a category. The backend refuses categories that still have posts.
    async fn delete_category(&self, id: &str) -> Result<()>;
}
