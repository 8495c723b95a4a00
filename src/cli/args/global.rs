//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// For most options, the precedence is: CLI flag > environment variable >
/// config file > default. This struct captures the CLI/env layer; config file
/// defaults are resolved later in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format override
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.blogop/config.yaml)
    pub config: Option<String>,

    /// Blog backend host override
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Collect the global flags of a parsed command line.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Config path override, if any.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Backend host override, if any.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
