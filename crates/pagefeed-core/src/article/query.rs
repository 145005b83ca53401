//! The listing request.

use serde::{Deserialize, Serialize};

use crate::paginate::PageRequest;
use crate::types::UserId;

/// A request to list articles: filter criteria plus page positioning.
///
/// All filter fields are independent and optional. `feed` only has an effect
/// when `current_user` is known.
///
/// # Example
///
/// ```
/// use pagefeed_core::ArticleQuery;
///
/// let query = ArticleQuery::new().tag("rust").author("jake").limit(10);
/// assert_eq!(query.page().limit(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited_by: Option<String>,
    pub feed: bool,
    pub current_user: Option<UserId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub cursor: Option<String>,
}

impl ArticleQuery {
    /// An unfiltered request for the first page.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn author(mut self, username: impl Into<String>) -> Self {
        self.author = Some(username.into());
        self
    }

    pub fn favorited_by(mut self, username: impl Into<String>) -> Self {
        self.favorited_by = Some(username.into());
        self
    }

    /// Restrict to authors followed by the current user.
    pub fn feed(mut self) -> Self {
        self.feed = true;
        self
    }

    /// Set the authenticated identity making the request.
    pub fn current_user(mut self, user: UserId) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Returns the normalized page positioning of this request.
    pub fn page(&self) -> PageRequest {
        PageRequest::from_raw(self.limit, self.offset, self.cursor.clone())
    }
}

/// Returns `value` unless it is missing or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
