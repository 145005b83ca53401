//! Article and profile types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cursor::CursorKey;
use crate::types::{ArticleId, TagId, UserId, Username};

/// An article as listed by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Store-allocated identifier, monotonic in creation order.
    pub id: ArticleId,

    /// URL slug.
    pub slug: String,

    pub title: String,

    pub body: String,

    /// The author's account.
    pub author: UserId,

    /// Creation time. Not unique; ties are broken by `id`.
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub tags: BTreeSet<TagId>,

    /// Accounts that favorited this article.
    #[serde(default)]
    pub favorited_by: BTreeSet<UserId>,
}

impl Article {
    /// Returns this article's position in the feed ordering.
    pub fn key(&self) -> CursorKey {
        CursorKey::new(self.created_at, self.id)
    }

    /// Check whether the article carries `tag`.
    pub fn is_tagged(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }

    /// Check whether `user` favorited the article.
    pub fn is_favorited_by(&self, user: UserId) -> bool {
        self.favorited_by.contains(&user)
    }
}

/// A user account as seen by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: Username,

    /// Accounts this user follows.
    #[serde(default)]
    pub following: BTreeSet<UserId>,
}

impl Profile {
    /// Create a profile that follows nobody.
    pub fn new(id: UserId, username: Username) -> Self {
        Self {
            id,
            username,
            following: BTreeSet::new(),
        }
    }

    /// Add `target` to the following set.
    pub fn with_following(mut self, target: UserId) -> Self {
        self.following.insert(target);
        self
    }
}
