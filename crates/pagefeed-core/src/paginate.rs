//! Hybrid cursor/offset pagination.
//!
//! The feed is ordered newest first with ties broken by the higher id. A
//! decodable cursor positions the page strictly after the cursor's article;
//! otherwise a positive offset skips leading articles; otherwise the page
//! starts at the top. One article more than the limit is fetched to learn
//! whether another page exists.

use std::cmp::Ordering;

use tracing::debug;

use crate::Result;
use crate::article::Article;
use crate::cursor::{self, CursorKey};
use crate::envelope::{self, ArticlesPage, PageSlice};
use crate::filter::ArticleFilter;
use crate::traits::{ArticleSource, Window};

/// Page size used when a request gives none.
pub const DEFAULT_LIMIT: u32 = 20;

/// Feed ordering: `created_at` descending, then `id` descending.
pub fn feed_order(a: &Article, b: &Article) -> Ordering {
    b.key().cmp(&a.key())
}

/// Normalized page positioning.
///
/// Limits below 1 are clamped to 1 and offsets below 1 mean "no offset", so
/// every request is servable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    offset: u64,
    cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl PageRequest {
    /// A request for the first `limit` articles.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            offset: 0,
            cursor: None,
        }
    }

    /// Build a request from raw, possibly out-of-range, parameters.
    pub fn from_raw(limit: Option<i64>, offset: Option<i64>, cursor: Option<String>) -> Self {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(n) => u32::try_from(n.max(1)).unwrap_or(u32::MAX),
        };
        let offset = offset.and_then(|n| u64::try_from(n).ok()).unwrap_or(0);

        Self {
            limit,
            offset,
            cursor,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Resolve where the page starts. A valid cursor wins over the offset;
    /// an invalid one is ignored as if it had not been sent.
    pub fn position(&self) -> Position {
        if let Some(token) = self.cursor() {
            match cursor::try_decode(token) {
                Ok(key) => return Position::After(key),
                Err(e) => debug!(error = %e, "Ignoring invalid cursor"),
            }
        }

        if self.offset > 0 {
            Position::Skip(self.offset)
        } else {
            Position::Start
        }
    }
}

/// Where a page begins in the feed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Strictly after the article at this key.
    After(CursorKey),
    /// After skipping this many articles (legacy offset paging).
    Skip(u64),
    /// At the newest article.
    Start,
}

impl Position {
    /// The window fetching `take` articles from this position.
    pub fn window(self, take: usize) -> Window {
        match self {
            Position::After(key) => Window {
                after: Some(key),
                skip: 0,
                take,
            },
            Position::Skip(skip) => Window {
                after: None,
                skip,
                take,
            },
            Position::Start => Window::first(take),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Position::After(_) => "cursor",
            Position::Skip(_) => "offset",
            Position::Start => "start",
        }
    }
}

/// Produce one page of the articles matching `filter`.
///
/// `total_count` counts every match regardless of position.
pub async fn paginate<S>(
    source: &S,
    filter: &ArticleFilter,
    request: &PageRequest,
) -> Result<ArticlesPage>
where
    S: ArticleSource + ?Sized,
{
    let total_count = source.count(filter).await?;
    let slice = fetch_slice(source, filter, request).await?;
    Ok(envelope::assemble(total_count, slice))
}

/// Fetch the page at the request's position, over-fetching by one.
pub async fn fetch_slice<S>(
    source: &S,
    filter: &ArticleFilter,
    request: &PageRequest,
) -> Result<PageSlice>
where
    S: ArticleSource + ?Sized,
{
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let position = request.position();
    let window = position.window(limit.saturating_add(1));

    debug!(mode = position.mode(), limit, "Fetching page");

    let mut items = source.fetch(filter, &window).await?;

    let has_more = items.len() > limit;
    items.truncate(limit);

    // The cursor marks the last article kept, not the over-fetched one.
    let next_cursor = if has_more {
        items.last().map(|a| a.key().encode())
    } else {
        None
    };

    Ok(PageSlice {
        items,
        has_more,
        next_cursor,
    })
}
