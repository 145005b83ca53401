//! List articles command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use pagefeed_core::{ArticleQuery, ArticlesPage, list_articles};
use pagefeed_file::FileCatalog;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only articles carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only articles written by this username
    #[arg(long)]
    pub author: Option<String>,

    /// Only articles favorited by this username
    #[arg(long)]
    pub favorited: Option<String>,

    /// Only articles by authors the viewer follows (requires --viewer to filter)
    #[arg(long)]
    pub feed: bool,

    /// Maximum number of articles per page (values below 1 are treated as 1)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Number of articles to skip (ignored when a valid cursor is given)
    #[arg(long)]
    pub offset: Option<i64>,

    /// Pagination cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Follow cursors until the last page
    #[arg(long)]
    pub all: bool,

    /// Print each page envelope as pretty JSON
    #[arg(long)]
    pub pretty: bool,
}

impl ListArgs {
    fn query(&self, config: &Config) -> ArticleQuery {
        ArticleQuery {
            tag: self.tag.clone(),
            author: self.author.clone(),
            favorited_by: self.favorited.clone(),
            feed: self.feed,
            current_user: config.viewer,
            limit: self.limit,
            offset: self.offset,
            cursor: self.cursor.clone(),
        }
    }
}

pub async fn run(args: ListArgs, config: &Config) -> Result<()> {
    debug!(store = %config.store_root.display(), "Opening store");
    let catalog = FileCatalog::new(&config.store_root);
    let base = args.query(config);
    let mut query = base.clone();

    loop {
        let page = list_articles(&catalog, &catalog, &query)
            .await
            .context("Failed to list articles")?;

        debug!(
            items = page.items.len(),
            has_more = page.has_more,
            "Listed page"
        );

        print_page(&page, args.pretty)?;

        match page.next_cursor {
            Some(cursor) if args.all => {
                // Offsets only position the first page.
                query = ArticleQuery {
                    offset: None,
                    ..base.clone()
                }
                .cursor(cursor);
            }
            _ => break,
        }
    }

    Ok(())
}

fn print_page(page: &ArticlesPage, pretty: bool) -> Result<()> {
    if pretty {
        output::json_pretty(page)?;
    } else {
        for article in &page.items {
            output::json(article)?;
        }
    }

    if page.items.is_empty() {
        eprintln!("{}", "No articles found.".dimmed());
    }

    output::note("Total", &page.total_count.to_string());
    if let Some(cursor) = &page.next_cursor {
        output::note("Next cursor", cursor);
    }

    Ok(())
}
