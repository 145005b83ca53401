//! Filter composition.
//!
//! Each criterion in an [`ArticleQuery`] becomes one [`Constraint`], resolved
//! against the [`Directory`] exactly once per request. Constraints are
//! combined by conjunction. A criterion naming an entity that does not exist
//! makes the whole listing empty, reported as [`FilterPlan::Empty`] rather
//! than as an error.

use std::collections::BTreeSet;

use tracing::debug;

use crate::Result;
use crate::article::query::non_blank;
use crate::article::{Article, ArticleQuery};
use crate::error::NotFoundError;
use crate::traits::Directory;
use crate::types::{TagId, UserId, Username};

/// A single predicate over articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Written by one of these authors.
    AuthorIn(BTreeSet<UserId>),
    /// Carries this tag.
    Tagged(TagId),
    /// Written by this author.
    AuthoredBy(UserId),
    /// Favorited by this user.
    FavoritedBy(UserId),
}

impl Constraint {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Constraint::AuthorIn(authors) => authors.contains(&article.author),
            Constraint::Tagged(tag) => article.is_tagged(tag),
            Constraint::AuthoredBy(author) => article.author == *author,
            Constraint::FavoritedBy(user) => article.is_favorited_by(*user),
        }
    }
}

/// A conjunction of constraints. The empty filter matches every article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    constraints: Vec<Constraint>,
}

impl ArticleFilter {
    /// A filter matching every article.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a constraint to the conjunction.
    pub fn and(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_unfiltered(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check whether `article` satisfies every constraint.
    pub fn matches(&self, article: &Article) -> bool {
        self.constraints.iter().all(|c| c.matches(article))
    }
}

/// Outcome of composing the filter for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPlan {
    /// List the articles matching this filter.
    Matching(ArticleFilter),
    /// A referenced entity does not exist; nothing can match.
    Empty,
}

/// Resolve the filter criteria of `query` into a [`FilterPlan`].
///
/// Stages run in order: feed, tag, author, favorited-by. The first stage
/// whose referenced entity is missing ends composition with
/// [`FilterPlan::Empty`].
///
/// # Errors
///
/// Returns [`NotFoundError::User`] when feed mode is requested for a current
/// user the directory does not know. Directory failures are passed through.
pub async fn compose<D>(directory: &D, query: &ArticleQuery) -> Result<FilterPlan>
where
    D: Directory + ?Sized,
{
    let mut filter = ArticleFilter::all();

    // Without a current user, feed mode does not restrict authors.
    if query.feed
        && let Some(current) = query.current_user
    {
        let profile = directory
            .find_user_by_id(current)
            .await?
            .ok_or(NotFoundError::User { id: current })?;
        filter = filter.and(Constraint::AuthorIn(profile.following));
    }

    if let Some(tag) = non_blank(query.tag.as_deref()) {
        match directory.find_tag(tag).await? {
            Some(id) => filter = filter.and(Constraint::Tagged(id)),
            None => {
                debug!(tag, "Tag not found");
                return Ok(FilterPlan::Empty);
            }
        }
    }

    if let Some(author) = non_blank(query.author.as_deref()) {
        match resolve_user(directory, author).await? {
            Some(id) => filter = filter.and(Constraint::AuthoredBy(id)),
            None => {
                debug!(author, "Author not found");
                return Ok(FilterPlan::Empty);
            }
        }
    }

    if let Some(username) = non_blank(query.favorited_by.as_deref()) {
        match resolve_user(directory, username).await? {
            Some(id) => filter = filter.and(Constraint::FavoritedBy(id)),
            None => {
                debug!(favorited_by = username, "Favoriting user not found");
                return Ok(FilterPlan::Empty);
            }
        }
    }

    Ok(FilterPlan::Matching(filter))
}

/// A name that is not a valid username cannot belong to anyone.
async fn resolve_user<D>(directory: &D, name: &str) -> Result<Option<UserId>>
where
    D: Directory + ?Sized,
{
    let Ok(username) = Username::new(name) else {
        return Ok(None);
    };
    Ok(directory.find_user(&username).await?.map(|p| p.id))
}
