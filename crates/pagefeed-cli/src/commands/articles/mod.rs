//! Article subcommand implementations.

mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ArticlesCommand {
    #[command(subcommand)]
    pub command: ArticlesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ArticlesSubcommand {
    /// List articles, newest first
    List(list::ListArgs),
}

pub async fn handle(cmd: ArticlesCommand, config: &Config) -> Result<()> {
    match cmd.command {
        ArticlesSubcommand::List(args) => list::run(args, config).await,
    }
}
