//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, token storage and client initialization.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{BlogClient, ClientOptions, FileStorage, SessionSink, SessionState};
use crate::config::Config;
use crate::error::{ApiError, Error, Result};

/// Session sink for an interactive terminal.
///
/// A failed refresh is reported on stderr; the "redirect" is a pointer to
/// `blogop login`, since there is no login screen to navigate to.
#[derive(Debug, Default)]
pub struct TerminalSessionSink;

impl SessionSink for TerminalSessionSink {
    fn auth_failed(&self, error: &ApiError) {
        log::debug!("Authentication failed: {}", error);
        eprintln!("{} Your session has expired.", "⚠".yellow());
    }

    fn redirect_to_login(&self) {
        eprintln!("  → Run 'blogop login' to sign in again");
    }
}

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
    /// API client backed by the on-disk session file
    pub client: Arc<BlogClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config (or defaults when no file exists), opens the session file
    /// next to it and builds the client. No network request is made.
    ///
    /// # Errors
    /// Returns error if the config or session file is unreadable.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(&config_path)?;

        let storage = FileStorage::open(Config::session_path(&config_path))?;
        let client = BlogClient::new(
            config.base_url(opts.api_host_ref()),
            Arc::new(storage),
            Arc::new(TerminalSessionSink),
            ClientOptions {
                timeout: config.timeout(),
                redirect_delay: config.auth_redirect_delay(),
            },
        )?;

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_config)
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            config_path,
            client: Arc::new(client),
            format,
        })
    }

    /// Restore the stored session and fail unless it is authenticated.
    pub async fn require_auth(&self) -> Result<SessionState> {
        let state = self.client.restore_session().await;
        if !state.is_authenticated {
            return Err(Error::NotAuthenticated);
        }
        Ok(state)
    }
}
