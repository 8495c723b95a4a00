//! Config command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Print the effective configuration
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_or_default(&path)?;

    println!("Config file: {}", path.display().to_string().cyan());
    if !path.exists() {
        println!("  {}", "(not created yet; showing defaults)".dimmed());
    }
    println!();
    println!("api_host: {}", config.api_host(opts.api_host_ref()));
    println!(
        "format: {}",
        config.preferences.format.as_deref().unwrap_or("table")
    );
    println!("timeout_secs: {}", config.preferences.timeout_secs);
    println!(
        "auth_redirect_delay_ms: {}",
        config.preferences.auth_redirect_delay_ms
    );

    Ok(())
}

/// Persist the backend host
pub fn set_host(opts: &GlobalOptions, url: &str) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "API host must start with http:// or https:// (got '{}')",
            url
        ))
        .into());
    }

    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_or_default(&path)?;
    config.api_host = Some(url.to_string());
    config.save_to(&path)?;

    println!("{} API host set to {}", "✓".green(), url.bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_host_writes_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");
        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };

        set_host(&opts, "https://blog.example.com/").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_host.as_deref(), Some("https://blog.example.com"));
    }

    #[test]
    fn test_set_host_rejects_bare_hostname() {
        let temp = tempdir().unwrap();
        let opts = GlobalOptions {
            config: Some(temp.path().join("config.yaml").to_string_lossy().to_string()),
            ..Default::default()
        };

        assert!(set_host(&opts, "blog.example.com").is_err());
        assert!(!temp.path().join("config.yaml").exists());
    }
}
