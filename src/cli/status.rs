//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json;

/// Machine-readable status
#[derive(Debug, Serialize)]
struct StatusReport {
    config_path: String,
    api_url: String,
    logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_expires_at: Option<String>,
    token_expired: bool,
}

/// Run the status command to display session and configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = ctx.session();
    let claims = session.as_ref().and_then(|s| s.claims());
    let now = chrono::Utc::now();
    let expired = claims.as_ref().is_some_and(|c| c.is_expired_at(now));

    if ctx.format == OutputFormat::Json {
        let report = StatusReport {
            config_path: ctx.config_path.display().to_string(),
            api_url: ctx.api_url.clone(),
            logged_in: session.is_some(),
            username: session
                .as_ref()
                .and_then(|s| s.signer_name().map(str::to_string)),
            role: session.as_ref().and_then(|s| s.role.clone()),
            token_subject: claims.as_ref().and_then(|c| c.sub.clone()),
            token_issued_at: claims
                .as_ref()
                .and_then(|c| c.issued_at())
                .map(|t| t.to_rfc3339()),
            token_expires_at: claims
                .as_ref()
                .and_then(|c| c.expires_at())
                .map(|t| t.to_rfc3339()),
            token_expired: expired,
        };
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "DocSign Status".bold());
    println!("Config file: {}", ctx.config_path.display().to_string().cyan());
    println!("API URL:     {}", ctx.api_url.cyan());
    println!();

    let Some(session) = session else {
        println!("{} Not logged in", "✗".red());
        println!("  → Run 'docsign login <username or email>'");
        return Ok(());
    };

    println!("{} Logged in as {}", "✓".green(), session.display_name().bold());
    if let Some(ref role) = session.role {
        println!("  Role: {}", role);
    }
    if let Some(ref email) = session.email {
        println!("  Email: {}", email);
    }

    match claims.as_ref().and_then(|c| c.expires_at()) {
        Some(_) if expired => {
            println!("{} Token expired", "⚠".yellow());
            println!("  → Run 'docsign login' again");
        }
        Some(expires) => {
            let remaining = expires.signed_duration_since(now);
            println!(
                "{} Token valid (expires in {}h {}m)",
                "✓".green(),
                remaining.num_hours(),
                remaining.num_minutes() % 60
            );
        }
        None => println!("{} Token expiry unknown", "○".dimmed()),
    }

    Ok(())
}
