//! Cursor subcommand implementations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use pagefeed_core::ArticleId;
use pagefeed_core::cursor;

use crate::output;

#[derive(Args, Debug)]
pub struct CursorCommand {
    #[command(subcommand)]
    pub command: CursorSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CursorSubcommand {
    /// Build a cursor token for a feed position
    Encode(EncodeArgs),

    /// Show the feed position inside a cursor token
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Creation time of the last seen article (RFC 3339)
    #[arg(long)]
    pub created_at: String,

    /// Id of the last seen article
    #[arg(long)]
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Cursor token
    pub token: String,
}

pub fn handle(cmd: CursorCommand) -> Result<()> {
    match cmd.command {
        CursorSubcommand::Encode(args) => encode(args),
        CursorSubcommand::Decode(args) => decode(args),
    }
}

fn encode(args: EncodeArgs) -> Result<()> {
    let created_at = DateTime::parse_from_rfc3339(&args.created_at)
        .context("Invalid --created-at timestamp")?
        .with_timezone(&Utc);

    println!("{}", cursor::encode(created_at, ArticleId::new(args.id)));

    Ok(())
}

fn decode(args: DecodeArgs) -> Result<()> {
    // Listing ignores bad cursors; here the reason is the point.
    let key = cursor::try_decode(&args.token).context("Invalid cursor")?;

    output::field("Created at", &key.created_at.to_rfc3339());
    output::field("Id", &key.id.to_string());

    Ok(())
}
