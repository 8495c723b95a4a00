//! Blogop CLI - command-line client for the blog platform

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{
    CategoryCommands, Cli, CommandContext, Commands, ConfigCommands, PostCommands, TagCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::SetHost { url } => cli::config::set_host(&opts, &url),
        },
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Version => {
            println!("blogop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        command => {
            let ctx = CommandContext::new(&opts)?;
            let result = run_client_command(&ctx, command).await;
            // Deliver a pending login redirect before the process exits
            ctx.client.shutdown().await;
            result
        }
    }
}

async fn run_client_command(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => cli::auth::login(ctx, email, password).await,
        Commands::Register {
            name,
            email,
            password,
        } => cli::auth::register(ctx, &name, &email, password).await,
        Commands::Logout => cli::auth::logout(ctx).await,
        Commands::Whoami => cli::auth::whoami(ctx).await,
        Commands::Status => cli::status::run(ctx).await,
        Commands::Post(post_cmd) => match post_cmd {
            PostCommands::List {
                category,
                tag,
                limit,
            } => cli::post::list(ctx, category, tag, limit).await,
            PostCommands::Get { id } => cli::post::get(ctx, &id).await,
            PostCommands::Drafts => cli::post::drafts(ctx).await,
            PostCommands::Create(args) => cli::post::create(ctx, &args).await,
            PostCommands::Update { id, args } => cli::post::update(ctx, &id, &args).await,
            PostCommands::Delete { ids } => cli::post::delete(ctx, &ids).await,
        },
        Commands::Category(category_cmd) => match category_cmd {
            CategoryCommands::List => cli::category::list(ctx).await,
            CategoryCommands::Create { name } => cli::category::create(ctx, &name).await,
            CategoryCommands::Delete { ids } => cli::category::delete(ctx, &ids).await,
        },
        Commands::Tag(tag_cmd) => match tag_cmd {
            TagCommands::List => cli::tag::list(ctx).await,
            TagCommands::Create { names } => cli::tag::create(ctx, &names).await,
            TagCommands::Delete { ids } => cli::tag::delete(ctx, &ids).await,
        },
        Commands::Config(_) | Commands::Completion { .. } | Commands::Version => Ok(()),
    }
}

/// Route `log` output to stderr; `--debug` lowers the default level.
/// `RUST_LOG` still takes precedence when set.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
