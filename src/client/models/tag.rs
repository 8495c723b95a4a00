//! Tag models

use serde::{Deserialize, Serialize};

/// Post tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,

    /// Number of published posts (optional, list endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u32>,
}

/// Body for `POST /tags`; the backend creates every missing name
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagsRequest {
    pub names: Vec<String>,
}
