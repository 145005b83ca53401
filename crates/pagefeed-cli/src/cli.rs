//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::articles::ArticlesCommand;
use crate::commands::cursor::CursorCommand;
use crate::commands::store::StoreCommand;

/// List and page through articles in a pagefeed store.
#[derive(Parser, Debug)]
#[command(name = "pagefeed")]
#[command(author, version = env!("PAGEFEED_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Store directory (defaults to the platform data directory)
    #[arg(long, env = "PAGEFEED_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// User id of the viewer, used by feed listings
    #[arg(long, env = "PAGEFEED_VIEWER", global = true)]
    pub viewer: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Article listing
    Articles(ArticlesCommand),

    /// Store maintenance
    Store(StoreCommand),

    /// Inspect or build pagination cursors
    Cursor(CursorCommand),
}
