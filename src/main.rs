//! msearch CLI entry point

use clap::Parser;
use msearch::cli::{Cli, Commands};
use msearch::core::config::Config;
use msearch::core::error::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays clean for --json)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .with(EnvFilter::try_from_env("MSEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("msearch=info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(Error::ConfigError {
                message: format!("Config file not found: {}", path.display()),
            })
        }
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Search(args) => msearch::cli::search::run(args, &config).await,
        Commands::Open(args) => msearch::cli::browser::run(args, &config),
        Commands::Url(args) => msearch::cli::url::run(args, &config),
        Commands::Interactive => msearch::cli::interactive::run(&config).await,
        Commands::Status => msearch::cli::status::run(&config),
        Commands::Keywords => msearch::cli::keywords::run(&config),
    }
}
