//! JSON seed import.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};

use pagefeed_core::error::InvalidInputError;
use pagefeed_core::{Result, TagId, UserId, Username};

use crate::store::{FileStore, NewArticle};

/// A document describing users and articles to load into a store.
///
/// ```json
/// {
///   "users": [{ "username": "jake", "following": ["anna"] }],
///   "articles": [{ "slug": "hi", "title": "Hi", "author": "anna", "tags": ["rust"] }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seed {
    pub users: Vec<SeedUser>,
    pub articles: Vec<SeedArticle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub username: Username,
    #[serde(default)]
    pub following: Vec<Username>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedArticle {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub author: Username,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default)]
    pub favorited_by: Vec<Username>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Counts of entities created by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub articles: usize,
}

/// Load `seed` into `store`.
///
/// Users that already exist are reused. Articles are inserted in document
/// order, so ids follow that order.
///
/// # Errors
///
/// Fails if an article or follow references a username that is neither in
/// the store nor in the seed.
#[instrument(skip_all, fields(users = seed.users.len(), articles = seed.articles.len()))]
pub fn import_seed(store: &FileStore, seed: &Seed) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for user in &seed.users {
        if store.find_user_by_username(&user.username)?.is_none() {
            store.insert_user(&user.username)?;
            summary.users += 1;
        }
    }

    for user in &seed.users {
        let id = resolve(store, &user.username)?;
        for target in &user.following {
            store.follow(id, resolve(store, target)?)?;
        }
    }

    for article in &seed.articles {
        let mut new = NewArticle::new(&article.slug, &article.title, resolve(store, &article.author)?)
            .body(&article.body);
        new.tags = article.tags.clone();
        new.created_at = article.created_at;
        for username in &article.favorited_by {
            new.favorited_by.insert(resolve(store, username)?);
        }

        store.insert_article(new)?;
        summary.articles += 1;
    }

    info!(
        users = summary.users,
        articles = summary.articles,
        "Imported seed"
    );

    Ok(summary)
}

fn resolve(store: &FileStore, username: &Username) -> Result<UserId> {
    store
        .find_user_by_username(username)?
        .map(|p| p.id)
        .ok_or_else(|| {
            InvalidInputError::Other {
                message: format!("unknown user '{}' in seed", username),
            }
            .into()
        })
}
