//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration and session status
pub async fn run(ctx: &CommandContext) -> Result<()> {
    println!("{}\n", "Blogop Status".bold());

    println!("Config file: {}", ctx.config_path.display().to_string().cyan());
    println!(
        "Session file: {}",
        Config::session_path(&ctx.config_path)
            .display()
            .to_string()
            .cyan()
    );
    println!("API: {}", ctx.client.base_url().cyan());
    println!();

    let tokens = ctx.client.tokens();
    match tokens.expires_at() {
        Some(_) if tokens.access_token().is_none() => {
            println!("{} Stored session is incomplete", "⚠".yellow());
        }
        Some(expires) => {
            let remaining = expires.signed_duration_since(chrono::Utc::now());
            if remaining.num_seconds() <= 0 {
                println!(
                    "{} Access token expired (will refresh on next command)",
                    "⚠".yellow()
                );
            } else {
                println!(
                    "{} Access token valid (expires in {}m {}s)",
                    "✓".green(),
                    remaining.num_minutes(),
                    remaining.num_seconds() % 60
                );
            }
        }
        None => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'blogop login' to sign in");
            return Ok(());
        }
    }

    ctx.client.restore_session().await;
    let session = ctx.client.session();
    match (session.is_authenticated(), session.user()) {
        (true, Some(user)) => println!(
            "{} Signed in as {} <{}>",
            "✓".green(),
            user.name.bold(),
            user.email
        ),
        (true, None) => println!("{} Signed in (profile unavailable)", "✓".green()),
        (false, _) => {
            println!("{} Session is no longer valid", "✗".red());
            println!("  → Run 'blogop login' to sign in again");
        }
    }

    Ok(())
}
