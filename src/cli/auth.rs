//! Register, login and logout commands

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::AuthApi;
use crate::client::models::{RegisterRequest, Role};
use crate::error::{Error, Result};
use crate::output;

/// Use the given password or prompt for one
fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Run the register command
pub async fn register(
    opts: &GlobalOptions,
    username: String,
    email: String,
    role: Role,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if username.trim().is_empty() || email.trim().is_empty() {
        return Err(Error::InvalidInput(
            "username and email must not be empty".to_string(),
        ));
    }

    let password = password_or_prompt(password, true)?;
    let request = RegisterRequest {
        username,
        email,
        password,
        role,
    };

    let message = ctx.client.register(&request).await?;
    let message = if message.is_empty() {
        "Account created".to_string()
    } else {
        message
    };

    output::print_success(&message, ctx.format)?;
    if ctx.format != crate::cli::OutputFormat::Json {
        println!(
            "  You can now log in with {}",
            format!("docsign login {}", request.username).cyan()
        );
    }
    Ok(())
}

/// Run the login command
pub async fn login(opts: &GlobalOptions, identifier: String, password: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let password = password_or_prompt(password, false)?;

    let session = ctx.client.login(&identifier, &password).await?;

    output::print_success(
        &format!("Logged in successfully as {}", session.display_name()),
        ctx.format,
    )?;
    Ok(())
}

/// Run the logout command
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let previous = ctx.session();

    ctx.client.logout().await?;

    let message = match previous {
        Some(session) => format!("Logged out {}", session.display_name()),
        None => "No active session".to_string(),
    };
    output::print_success(&message, ctx.format)
}
