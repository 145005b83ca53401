//! Response envelope.

use serde::{Deserialize, Serialize};

use crate::article::Article;

/// One page of a listing, as returned to callers.
///
/// `next_cursor` is present exactly when `has_more` is true and `items` is
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesPage {
    pub items: Vec<Article>,

    /// Number of articles matching the filter, across all pages.
    pub total_count: u64,

    pub next_cursor: Option<String>,

    pub has_more: bool,
}

impl ArticlesPage {
    /// The well-formed page for a listing nothing can match.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The positioned part of a page, before the total is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSlice {
    pub items: Vec<Article>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Combine the match count with a page slice.
pub fn assemble(total_count: u64, slice: PageSlice) -> ArticlesPage {
    let PageSlice {
        items,
        has_more,
        next_cursor,
    } = slice;

    let next_cursor = next_cursor.filter(|_| has_more && !items.is_empty());

    ArticlesPage {
        items,
        total_count,
        next_cursor,
        has_more,
    }
}
