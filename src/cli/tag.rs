//! Tag commands

use crate::cli::CommandContext;
use crate::cli::handlers::{delete_many, print_list};
use crate::client::TagApi;
use crate::client::models::Tag;
use crate::error::Result;
use crate::models::TagDisplay;

/// List tags
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let tags = ctx.client.list_tags().await?;
    print_list::<Tag, TagDisplay>(tags, None, "tags", ctx.format)
}

/// Create tags in one request
pub async fn create(ctx: &CommandContext, names: &[String]) -> Result<()> {
    ctx.require_auth().await?;

    let names: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    let tags = ctx.client.create_tags(&names).await?;
    print_list::<Tag, TagDisplay>(tags, None, "tags", ctx.format)
}

/// Delete tags concurrently
pub async fn delete(ctx: &CommandContext, ids: &[String]) -> Result<()> {
    ctx.require_auth().await?;

    delete_many("tag", ids, |id| {
        let client = ctx.client.clone();
        async move { client.delete_tag(&id).await }
    })
    .await
}
