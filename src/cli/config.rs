//! Local configuration commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, json};

/// Show the effective configuration
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match ctx.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "api_url": ctx.api_url,
                "session_path": ctx.sessions.path().display().to_string(),
                "file": ctx.config,
            });
            println!("{}", json::format_json(&value)?);
        }
        _ => {
            println!("{}", "DocSign Configuration".bold());
            println!();
            println!("  Config file:  {}", ctx.config_path.display());
            println!("  Session file: {}", ctx.sessions.path().display());
            println!("  API URL:      {}", ctx.api_url.cyan());
            println!(
                "  Format:       {}",
                ctx.config.preferences.format.as_deref().unwrap_or("table")
            );
        }
    }
    Ok(())
}

/// Persist a new API base URL
pub fn set_url(opts: &GlobalOptions, url: &str) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;

    config.set_api_url(url)?;
    config.save_to(&path)?;

    output::print_success(
        &format!("API URL set to {}", config.api_url(None)),
        opts.format.unwrap_or_default(),
    )
}

/// Persist a default output format
pub fn set_format(opts: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;

    let name = match format {
        OutputFormat::Pretty => "pretty",
        OutputFormat::Table => "table",
        OutputFormat::Json => "json",
    };
    config.preferences.format = Some(name.to_string());
    config.save_to(&path)?;

    output::print_success(
        &format!("Default format set to {}", name),
        opts.format.unwrap_or_default(),
    )
}
