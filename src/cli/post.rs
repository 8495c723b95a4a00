//! Post commands

use colored::Colorize;
use log::debug;

use crate::cli::handlers::{delete_many, print_list};
use crate::cli::{CommandContext, OutputFormat, PostArgs, PostUpdateArgs};
use crate::client::PostApi;
use crate::client::models::{Post, PostFilter, PostRequest};
use crate::error::{Error, Result};
use crate::models::{PostDetail, PostDisplay};
use crate::output::json::format_json;

/// List published posts, optionally filtered
pub async fn list(
    ctx: &CommandContext,
    category: Option<String>,
    tag: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let filter = PostFilter {
        category_id: category,
        tag_id: tag,
    };

    let posts = ctx.client.list_posts(&filter).await?;
    print_list::<Post, PostDisplay>(posts, limit, "posts", ctx.format)
}

/// Show one post
pub async fn get(ctx: &CommandContext, id: &str) -> Result<()> {
    let post = ctx.client.get_post(id).await?;
    print_post(post, ctx.format)
}

/// List the signed-in user's drafts
pub async fn drafts(ctx: &CommandContext) -> Result<()> {
    ctx.require_auth().await?;

    let drafts = ctx.client.list_drafts().await?;
    print_list::<Post, PostDisplay>(drafts, None, "drafts", ctx.format)
}

/// Create a post
pub async fn create(ctx: &CommandContext, args: &PostArgs) -> Result<()> {
    let request = PostRequest {
        title: args.title.trim().to_string(),
        content: args.body()?,
        category_id: args.category.clone(),
        tag_ids: args.tags.clone(),
        status: args.status(),
    };
    validate(&request)?;

    ctx.require_auth().await?;

    let post = ctx.client.create_post(&request).await?;
    println!("{} Created post {} ({})", "✓".green(), post.id.bold(), post.status);
    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&post)?);
    }
    Ok(())
}

/// Update a post, keeping fields that were not given
pub async fn update(ctx: &CommandContext, id: &str, args: &PostUpdateArgs) -> Result<()> {
    ctx.require_auth().await?;

    let current = ctx.client.get_post(id).await?;
    let request = merge_update(current, args)?;
    validate(&request)?;
    debug!("Updating post {} with {} tags", id, request.tag_ids.len());

    let post = ctx.client.update_post(id, &request).await?;
    println!("{} Updated post {} ({})", "✓".green(), post.id.bold(), post.status);
    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&post)?);
    }
    Ok(())
}

/// Delete posts concurrently
pub async fn delete(ctx: &CommandContext, ids: &[String]) -> Result<()> {
    ctx.require_auth().await?;

    delete_many("post", ids, |id| {
        let client = ctx.client.clone();
        async move { client.delete_post(&id).await }
    })
    .await
}

fn print_post(post: Post, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", PostDetail::from(post).render()),
        OutputFormat::Json => println!("{}", format_json(&post)?),
    }
    Ok(())
}

/// Apply the given edits on top of the post as currently stored
fn merge_update(current: Post, args: &PostUpdateArgs) -> Result<PostRequest> {
    let category_id = if args.no_category {
        None
    } else {
        args.category
            .clone()
            .or_else(|| current.category.map(|c| c.id))
    };
    let tag_ids = match args.tags {
        Some(ref tags) => tags.clone(),
        None => current.tags.into_iter().map(|t| t.id).collect(),
    };

    Ok(PostRequest {
        title: args
            .title
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
            .unwrap_or(current.title),
        content: args.body()?.unwrap_or(current.content),
        category_id,
        tag_ids,
        status: args.status().unwrap_or(current.status),
    })
}

fn validate(request: &PostRequest) -> Result<()> {
    if request.title.trim().is_empty() {
        return Err(Error::Other("Post title must not be empty".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(Error::Other("Post content must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Category, PostStatus, Tag};

    fn stored_post() -> Post {
        Post {
            id: "p1".to_string(),
            title: "Original".to_string(),
            content: "Original body".to_string(),
            status: PostStatus::Draft,
            author: None,
            category: Some(Category {
                id: "c1".to_string(),
                name: "Programming".to_string(),
                post_count: None,
            }),
            tags: vec![Tag {
                id: "t1".to_string(),
                name: "rust".to_string(),
                post_count: None,
            }],
            reading_time: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let request = merge_update(stored_post(), &PostUpdateArgs::default()).unwrap();

        assert_eq!(request.title, "Original");
        assert_eq!(request.content, "Original body");
        assert_eq!(request.category_id.as_deref(), Some("c1"));
        assert_eq!(request.tag_ids, vec!["t1".to_string()]);
        assert_eq!(request.status, PostStatus::Draft);
    }

    #[test]
    fn test_merge_applies_edits() {
        let args = PostUpdateArgs {
            title: Some("  Renamed ".to_string()),
            no_category: true,
            tags: Some(vec![]),
            publish: true,
            ..Default::default()
        };

        let request = merge_update(stored_post(), &args).unwrap();

        assert_eq!(request.title, "Renamed");
        assert!(request.category_id.is_none());
        assert!(request.tag_ids.is_empty());
        assert_eq!(request.status, PostStatus::Published);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut request = merge_update(stored_post(), &PostUpdateArgs::default()).unwrap();
        assert!(validate(&request).is_ok());

        request.content = "   ".to_string();
        assert!(validate(&request).is_err());
    }
}
