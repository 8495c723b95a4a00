//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Tag, User};

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Published,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "DRAFT"),
            PostStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub content: String,

    pub status: PostStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Estimated reading time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for `POST /posts` and `PUT /posts/{id}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    pub tag_ids: Vec<String>,

    pub status: PostStatus,
}

/// Query filters for `GET /posts`
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category_id: Option<String>,
    pub tag_id: Option<String>,
}

impl PostFilter {
    /// Convert to query parameters, omitting unset filters
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(ref id) = self.category_id {
            params.push(("categoryId".to_string(), id.clone()));
        }
        if let Some(ref id) = self.tag_id {
            params.push(("tagId".to_string(), id.clone()));
        }
        params
    }
}
