//! The listing entry point.

use tracing::{debug, instrument};

use crate::Result;
use crate::article::ArticleQuery;
use crate::envelope::ArticlesPage;
use crate::filter::{self, FilterPlan};
use crate::paginate;
use crate::traits::{ArticleSource, Directory};

/// List one page of articles for `query`.
///
/// Composes the filter against `directory`, then counts and pages through
/// `source`. A filter naming a missing tag or user yields an empty page.
/// Dropping the returned future abandons the request without a partial
/// result.
///
/// # Errors
///
/// Returns [`Error::NotFound`](crate::Error::NotFound) when feed mode is
/// requested for a current user that does not exist, and passes through
/// failures of either collaborator.
#[instrument(
    skip(source, directory, query),
    fields(
        tag = query.tag.as_deref(),
        author = query.author.as_deref(),
        favorited_by = query.favorited_by.as_deref(),
        feed = query.feed,
    )
)]
pub async fn list_articles<S, D>(
    source: &S,
    directory: &D,
    query: &ArticleQuery,
) -> Result<ArticlesPage>
where
    S: ArticleSource + ?Sized,
    D: Directory + ?Sized,
{
    let filter = match filter::compose(directory, query).await? {
        FilterPlan::Matching(filter) => filter,
        FilterPlan::Empty => return Ok(ArticlesPage::empty()),
    };

    let page = paginate::paginate(source, &filter, &query.page()).await?;

    debug!(
        items = page.items.len(),
        total = page.total_count,
        has_more = page.has_more,
        "Listed articles"
    );

    Ok(page)
}
