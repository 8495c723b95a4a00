//! Category display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_count;
use crate::client::models::Category;

/// Category display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "CATEGORY ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "POSTS")]
    pub posts: String,
}

impl From<Category> for CategoryDisplay {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            posts: format_count(category.post_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        let display = CategoryDisplay::from(Category {
            id: "c1".to_string(),
            name: "Programming".to_string(),
            post_count: Some(12),
        });

        assert_eq!(display.id, "c1");
        assert_eq!(display.posts, "12");
    }
}
