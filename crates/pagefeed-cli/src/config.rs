//! Resolved runtime configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use pagefeed_core::UserId;

use crate::cli::Cli;

/// Settings shared by all commands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the article store.
    pub store_root: PathBuf,
    /// Identity of the caller, if any.
    pub viewer: Option<UserId>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let store_root = match &cli.store {
            Some(path) => path.clone(),
            None => default_store_root()?,
        };

        Ok(Self {
            store_root,
            viewer: cli.viewer.map(UserId::new),
        })
    }
}

fn default_store_root() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "pagefeed").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("store"))
}
