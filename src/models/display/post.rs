//! Post display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, truncate_string};
use crate::client::models::Post;
use crate::output::table::format_details;

/// Maximum title width in list tables
const TITLE_WIDTH: usize = 48;

/// Post row for list tables and JSON.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PostDisplay {
    #[tabled(rename = "POST ID")]
    pub id: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "TAGS")]
    pub tags: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<Post> for PostDisplay {
    fn from(post: Post) -> Self {
        let tags = join_tags(&post);
        let updated = format_datetime(post.updated_at.as_ref().or(post.created_at.as_ref()));

        Self {
            title: truncate_string(&post.title, TITLE_WIDTH),
            status: post.status.to_string(),
            category: post
                .category
                .map(|c| c.name)
                .unwrap_or_else(|| "--".to_string()),
            tags,
            updated,
            id: post.id,
        }
    }
}

/// Single post rendered as a field table followed by the body.
#[derive(Debug, Clone)]
pub struct PostDetail {
    fields: Vec<(&'static str, String)>,
    content: String,
}

impl From<Post> for PostDetail {
    fn from(post: Post) -> Self {
        let mut fields = vec![
            ("ID", post.id.clone()),
            ("Title", post.title.clone()),
            ("Status", post.status.to_string()),
        ];
        if let Some(ref author) = post.author {
            fields.push(("Author", format!("{} <{}>", author.name, author.email)));
        }
        fields.push((
            "Category",
            post.category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "--".to_string()),
        ));
        fields.push(("Tags", join_tags(&post)));
        if let Some(minutes) = post.reading_time {
            fields.push(("Reading time", format!("{} min", minutes)));
        }
        fields.push(("Created", format_datetime(post.created_at.as_ref())));
        fields.push(("Updated", format_datetime(post.updated_at.as_ref())));

        Self {
            fields,
            content: post.content,
        }
    }
}

impl PostDetail {
    /// Render the field table and the post body
    pub fn render(&self) -> String {
        let table = format_details(&self.fields);
        if self.content.trim().is_empty() {
            table
        } else {
            format!("{}\n\n{}", table, self.content.trim_end())
        }
    }
}

fn join_tags(post: &Post) -> String {
    if post.tags.is_empty() {
        return "--".to_string();
    }
    post.tags
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Category, PostStatus, Tag, User};

    fn post() -> Post {
        Post {
            id: "p1".to_string(),
            title: "Understanding lifetimes in practice".to_string(),
            content: "Lifetimes describe...".to_string(),
            status: PostStatus::Published,
            author: Some(User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
            category: Some(Category {
                id: "c1".to_string(),
                name: "Programming".to_string(),
                post_count: None,
            }),
            tags: vec![
                Tag {
                    id: "t1".to_string(),
                    name: "rust".to_string(),
                    post_count: None,
                },
                Tag {
                    id: "t2".to_string(),
                    name: "memory".to_string(),
                    post_count: None,
                },
            ],
            reading_time: Some(6),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_post_display_row() {
        let display = PostDisplay::from(post());

        assert_eq!(display.id, "p1");
        assert_eq!(display.status, "PUBLISHED");
        assert_eq!(display.category, "Programming");
        assert_eq!(display.tags, "rust, memory");
        assert_eq!(display.updated, "--");
    }

    #[test]
    fn test_post_display_truncates_title() {
        let mut p = post();
        p.title = "x".repeat(80);
        let display = PostDisplay::from(p);
        assert_eq!(display.title.chars().count(), TITLE_WIDTH);
        assert!(display.title.ends_with("..."));
    }

    #[test]
    fn test_post_detail_render() {
        let rendered = PostDetail::from(post()).render();

        assert!(rendered.contains("Ada <ada@example.com>"));
        assert!(rendered.contains("6 min"));
        assert!(rendered.ends_with("Lifetimes describe..."));
    }

    #[test]
    fn test_post_detail_without_optional_fields() {
        let mut p = post();
        p.author = None;
        p.category = None;
        p.tags.clear();
        p.content.clear();

        let rendered = PostDetail::from(p).render();
        assert!(!rendered.contains("Author"));
        assert!(rendered.contains("--"));
    }
}
