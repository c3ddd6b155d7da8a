//! DocSign CLI - upload, sign and manage documents on a DocSign server

use std::io;

use clap::{CommandFactory, Parser};

mod board;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ConfigCommands, DocCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Register {
            username,
            email,
            role,
            password,
        } => cli::auth::register(&opts, username, email, role, password).await,
        Commands::Login {
            identifier,
            password,
        } => cli::auth::login(&opts, identifier, password).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("docsign version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Doc(doc_cmd) => match doc_cmd {
            DocCommands::List => cli::doc::list(&opts).await,
            DocCommands::Upload { path } => cli::doc::upload(&opts, &path).await,
            DocCommands::Sign { id, name } => cli::doc::sign(&opts, id, name).await,
            DocCommands::Reject { id, yes } => cli::doc::reject(&opts, id, yes).await,
            DocCommands::Comment { id, message } => cli::doc::comment(&opts, id, &message).await,
            DocCommands::Delete { id, yes } => cli::doc::delete(&opts, id, yes).await,
            DocCommands::Download { id, output } => cli::doc::download(&opts, id, output).await,
        },
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::SetUrl { url } => cli::config::set_url(&opts, &url),
            ConfigCommands::SetFormat { format } => cli::config::set_format(&opts, format),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "docsign", &mut io::stdout());
            Ok(())
        }
    }
}
