//! Store subcommand implementations.

mod import;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StoreCommand {
    #[command(subcommand)]
    pub command: StoreSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum StoreSubcommand {
    /// Load users and articles from a JSON seed document
    Import(import::ImportArgs),
}

pub async fn handle(cmd: StoreCommand, config: &Config) -> Result<()> {
    match cmd.command {
        StoreSubcommand::Import(args) => import::run(args, config).await,
    }
}
