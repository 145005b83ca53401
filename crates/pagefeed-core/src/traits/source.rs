//! The filtered, ordered, sliceable article collection.

use async_trait::async_trait;

use crate::Result;
use crate::article::Article;
use crate::cursor::CursorKey;
use crate::filter::ArticleFilter;
use crate::paginate::feed_order;

/// A slice of the feed ordering: newest first, ties broken by higher id.
///
/// `after` and `skip` are never both set by the paginator; when they are,
/// the cursor is applied first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Keep only articles strictly after this position.
    pub after: Option<CursorKey>,
    /// Number of leading articles to skip.
    pub skip: u64,
    /// Maximum number of articles to return.
    pub take: usize,
}

impl Window {
    /// The first `take` articles of the ordering.
    pub fn first(take: usize) -> Self {
        Self {
            after: None,
            skip: 0,
            take,
        }
    }

    /// Apply `filter` and this window to an unordered set of articles.
    ///
    /// Stores that hold their articles in memory can answer
    /// [`ArticleSource::fetch`] with this directly.
    pub fn select<I>(&self, articles: I, filter: &ArticleFilter) -> Vec<Article>
    where
        I: IntoIterator<Item = Article>,
    {
        let mut matching: Vec<Article> = articles
            .into_iter()
            .filter(|a| filter.matches(a))
            .filter(|a| self.after.is_none_or(|after| after.admits(&a.key())))
            .collect();

        matching.sort_by(feed_order);

        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        matching.into_iter().skip(skip).take(self.take).collect()
    }
}

/// The article collection as seen by the paginator.
///
/// Both methods are expected to observe the same consistent view of the
/// collection within one request.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Count articles matching `filter`, ignoring any window.
    async fn count(&self, filter: &ArticleFilter) -> Result<u64>;

    /// Return the articles matching `filter` that fall in `window`, in feed
    /// order.
    async fn fetch(&self, filter: &ArticleFilter, window: &Window) -> Result<Vec<Article>>;
}
