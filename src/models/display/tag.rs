//! Tag display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_count;
use crate::client::models::Tag;

/// Tag display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TagDisplay {
    #[tabled(rename = "TAG ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "POSTS")]
    pub posts: String,
}

impl From<Tag> for TagDisplay {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            posts: format_count(tag.post_count),
        }
    }
}
