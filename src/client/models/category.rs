//! Category models

use serde::{Deserialize, Serialize};

/// Post category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,

    /// Number of published posts (optional, list endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u32>,
}

/// Body for `POST /categories`
#[derive(Debug, Clone, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}
