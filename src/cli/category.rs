//! Category commands

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::handlers::{delete_many, print_list};
use crate::client::CategoryApi;
use crate::client::models::Category;
use crate::error::Result;
use crate::models::CategoryDisplay;

/// List categories
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let categories = ctx.client.list_categories().await?;
    print_list::<Category, CategoryDisplay>(categories, None, "categories", ctx.format)
}

/// Create a category
pub async fn create(ctx: &CommandContext, name: &str) -> Result<()> {
    ctx.require_auth().await?;

    let category = ctx.client.create_category(name.trim()).await?;
    println!(
        "{} Created category {} ({})",
        "✓".green(),
        category.name.bold(),
        category.id
    );
    Ok(())
}

/// Delete categories concurrently
pub async fn delete(ctx: &CommandContext, ids: &[String]) -> Result<()> {
    ctx.require_auth().await?;

    delete_many("category", ids, |id| {
        let client = ctx.client.clone();
        async move { client.delete_category(&id).await }
    })
    .await
}
