//! Seed import command implementation.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use pagefeed_file::{FileStore, Seed, import_seed};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON seed file (use - for stdin)
    pub file: String,
}

pub async fn run(args: ImportArgs, config: &Config) -> Result<()> {
    let content = if args.file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.file).context("Failed to read seed file")?
    };

    let seed: Seed = serde_json::from_str(&content).context("Invalid seed document")?;

    let store = FileStore::new(&config.store_root);
    let summary = tokio::task::spawn_blocking(move || import_seed(&store, &seed))
        .await
        .context("Import task failed")?
        .context("Failed to import seed")?;

    output::success(&format!(
        "Imported {} users and {} articles into {}",
        summary.users,
        summary.articles,
        config.store_root.display()
    ));

    Ok(())
}
