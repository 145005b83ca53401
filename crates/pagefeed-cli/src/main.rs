//! pagefeed - CLI tool for listing articles from a pagefeed store.
//!
//! A thin wrapper over `pagefeed-core` and `pagefeed-file`, intended for
//! exploring filters and paging behavior against a local store.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{articles, cursor, store};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let config = Config::from_cli(&cli)?;

    match cli.command {
        Commands::Articles(cmd) => articles::handle(cmd, &config).await,
        Commands::Store(cmd) => store::handle(cmd, &config).await,
        Commands::Cursor(cmd) => cursor::handle(cmd),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
