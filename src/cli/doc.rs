//! Document command implementations

use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::models::Document;
use crate::client::{DocumentApi, PdfUpload};
use crate::error::{Error, Result};
use crate::output;

/// Spinner on stderr while a transfer is in flight
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Use the server's text, or `fallback` when it sent none
pub(crate) fn message_or(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Ask before a destructive action; `Ok(false)` means cancelled
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Run the doc list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let documents = ctx.client.list_documents().await?;
    debug!("Fetched {} documents", documents.len());

    let visible: Vec<&Document> = documents.iter().filter(|d| d.is_visible()).collect();
    output::print(&visible[..], ctx.format)
}

/// Run the doc upload command
pub async fn upload(opts: &GlobalOptions, path: &Path) -> Result<()> {
    // Validate before anything touches the network
    let upload = PdfUpload::from_path(path)?;
    let ctx = CommandContext::new(opts)?;

    debug!(
        "Uploading {} ({} bytes)",
        upload.file_name(),
        upload.size_bytes()
    );

    let pb = spinner(&format!("Uploading {}...", upload.file_name()));
    let result = ctx.client.upload_document(&upload).await;
    pb.finish_and_clear();

    let message = message_or(result?, "Document uploaded");
    output::print_success(&message, ctx.format)
}

/// Run the doc sign command
pub async fn sign(opts: &GlobalOptions, id: i64, name: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    // Default to the logged-in username, as the server does
    let name = name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| ctx.session().and_then(|s| s.signer_name().map(str::to_string)));

    let message = ctx.client.sign_document(id, name.as_deref()).await?;
    output::print_success(&message_or(message, "Document signed"), ctx.format)
}

/// Run the doc reject command
pub async fn reject(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes && !confirm(&format!("Reject document #{}?", id))? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let message = ctx.client.reject_document(id).await?;
    output::print_success(&message_or(message, "Document rejected"), ctx.format)
}

/// Run the doc comment command
pub async fn comment(opts: &GlobalOptions, id: i64, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(Error::InvalidInput("note must not be empty".to_string()));
    }
    let ctx = CommandContext::new(opts)?;

    let reply = ctx.client.comment_document(id, message.trim()).await?;
    output::print_success(&message_or(reply, "Comment attached to document"), ctx.format)
}

/// Run the doc delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        eprintln!(
            "{} Delete document #{}? It will no longer be listed.",
            "⚠".yellow(),
            id
        );
        if !confirm("Confirm deletion?")? {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let message = ctx.client.delete_document(id).await?;
    output::print_success(&message_or(message, "Document removed"), ctx.format)
}

/// Run the doc download command
pub async fn download(opts: &GlobalOptions, id: i64, output_path: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let pb = spinner(&format!("Downloading document #{}...", id));
    let result = ctx.client.download_document(id).await;
    pb.finish_and_clear();
    let file = result?;

    let target = match output_path {
        Some(path) if path.is_dir() => path.join(file.suggested_name(id)),
        Some(path) => path,
        None => PathBuf::from(file.suggested_name(id)),
    };

    std::fs::write(&target, &file.bytes)?;
    output::print_success(
        &format!("Saved {} ({} bytes)", target.display(), file.bytes.len()),
        ctx.format,
    )
}
