//! Account commands: login, register, logout, whoami

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::client::models::User;
use crate::client::{AuthApi, SessionState};
use crate::error::Result;
use crate::models::UserDisplay;
use crate::output::Formattable;

/// Sign in, prompting for anything not given on the command line.
pub async fn login(
    ctx: &CommandContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    println!("{}", "Signing in...".cyan());
    let state = ctx.client.login(&email, &password).await?;
    print_welcome(&state, &email);

    Ok(())
}

/// Create an account and sign in with it.
pub async fn register(
    ctx: &CommandContext,
    name: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    println!("{}", "Creating account...".cyan());
    let state = ctx.client.register(name, email, &password).await?;
    print_welcome(&state, email);

    Ok(())
}

/// Sign out locally and revoke the refresh token server-side.
pub async fn logout(ctx: &CommandContext) -> Result<()> {
    let tokens = ctx.client.tokens();
    if tokens.access_token().is_none() && tokens.refresh_token().is_none() {
        println!("{} Not signed in", "○".dimmed());
        return Ok(());
    }

    ctx.client.logout().await?;
    println!("{} Signed out", "✓".green());
    Ok(())
}

/// Show the signed-in user.
pub async fn whoami(ctx: &CommandContext) -> Result<()> {
    let state = ctx.require_auth().await?;

    let user = match state.user {
        Some(user) => user,
        None => ctx.client.whoami().await?,
    };

    vec![UserDisplay::from(user)].print(ctx.format)
}

fn print_welcome(state: &SessionState, email: &str) {
    match state.user {
        Some(User { ref name, .. }) => {
            println!("{} Signed in as {} <{}>", "✓".green(), name.bold(), email)
        }
        None => println!("{} Signed in as {}", "✓".green(), email.bold()),
    }
}
