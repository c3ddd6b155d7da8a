//! Command execution context
//!
//! Loads configuration, resolves the session location and builds the API
//! client once, so handlers only deal with their own command.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::DocSignClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{FileSessionStore, Session, SessionProvider};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolved config file path
    pub config_path: PathBuf,
    /// Effective API base URL
    pub api_url: String,
    /// Session storage next to the config file
    pub sessions: Arc<FileSessionStore>,
    /// API client reading its token from `sessions`
    pub client: Arc<DocSignClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be parsed, or the
    /// HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&config_path)?;

        let api_url = config.api_url(opts.api_url_ref());
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

        let sessions = Arc::new(FileSessionStore::in_dir(Config::dir_for(&config_path)));
        let client = Arc::new(DocSignClient::new(api_url.clone(), sessions.clone())?);

        log::debug!("Using API {} with config {}", api_url, config_path.display());

        Ok(Self {
            config,
            config_path,
            api_url,
            sessions,
            client,
            format,
        })
    }

    /// Current session, if any
    pub fn session(&self) -> Option<Session> {
        self.sessions.load()
    }
}
