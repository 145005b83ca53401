//! Filesystem storage for users and articles.
//!
//! Layout under the root:
//!
//! ```text
//! users/<id>.json
//! articles/<id>.json
//! sequence.json
//! store.lock
//! ```
//!
//! Every write happens while holding an exclusive lock on `store.lock`, and
//! documents are replaced through a temp file and rename so readers never
//! observe a partial document.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use pagefeed_core::error::{Error, InvalidInputError, StorageError};
use pagefeed_core::{Article, ArticleId, Profile, Result, TagId, UserId, Username};

fn corrupt(path: &Path, err: impl ToString) -> Error {
    Error::Storage(StorageError::Corrupt {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Next identifiers to hand out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sequence {
    next_user: u64,
    next_article: u64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            next_user: 1,
            next_article: 1,
        }
    }
}

/// An article to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub author: UserId,
    pub tags: BTreeSet<TagId>,
    pub favorited_by: BTreeSet<UserId>,
    /// Defaults to the time of insertion.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewArticle {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, author: UserId) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            body: String::new(),
            author,
            tags: BTreeSet::new(),
            favorited_by: BTreeSet::new(),
            created_at: None,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn tag(mut self, tag: TagId) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Filesystem-backed storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    fn articles_dir(&self) -> PathBuf {
        self.root.join("articles")
    }

    fn user_path(&self, id: UserId) -> PathBuf {
        self.users_dir().join(format!("{}.json", id))
    }

    fn article_path(&self, id: ArticleId) -> PathBuf {
        self.articles_dir().join(format!("{}.json", id))
    }

    fn sequence_path(&self) -> PathBuf {
        self.root.join("sequence.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("store.lock")
    }

    /// Run `f` while holding the store's exclusive write lock.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(&self.root)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&lock_file)?;

        result
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(value).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| corrupt(path, e))
    }

    fn read_all<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(item) = self.read_json(&path)?
            {
                items.push(item);
            }
        }

        Ok(items)
    }

    fn next_ids(&self) -> Result<Sequence> {
        Ok(self.read_json(&self.sequence_path())?.unwrap_or_default())
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user following nobody.
    ///
    /// # Errors
    ///
    /// Fails if the username is already taken.
    #[instrument(skip(self))]
    pub fn insert_user(&self, username: &Username) -> Result<Profile> {
        self.locked(|| {
            if self.find_user_by_username(username)?.is_some() {
                return Err(InvalidInputError::Other {
                    message: format!("username '{}' is already taken", username),
                }
                .into());
            }

            let mut sequence = self.next_ids()?;
            let profile = Profile::new(UserId::new(sequence.next_user), username.clone());
            sequence.next_user += 1;

            self.write_json(&self.user_path(profile.id), &profile)?;
            self.write_json(&self.sequence_path(), &sequence)?;

            debug!(id = %profile.id, username = %username, "Created user");

            Ok(profile)
        })
    }

    /// Make `user` follow `target`.
    #[instrument(skip(self))]
    pub fn follow(&self, user: UserId, target: UserId) -> Result<()> {
        self.locked(|| {
            let mut profile = self.require_user(user)?;
            self.require_user(target)?;

            if profile.following.insert(target) {
                self.write_json(&self.user_path(user), &profile)?;
            }

            Ok(())
        })
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<Profile>> {
        self.read_json(&self.user_path(id))
    }

    pub fn find_user_by_username(&self, username: &Username) -> Result<Option<Profile>> {
        Ok(self
            .load_users()?
            .into_iter()
            .find(|p| &p.username == username))
    }

    pub fn load_users(&self) -> Result<Vec<Profile>> {
        self.read_all(&self.users_dir())
    }

    fn require_user(&self, id: UserId) -> Result<Profile> {
        self.get_user(id)?.ok_or_else(|| {
            InvalidInputError::Other {
                message: format!("user {} does not exist", id),
            }
            .into()
        })
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Store a new article under the next article id.
    #[instrument(skip(self, article), fields(slug = %article.slug))]
    pub fn insert_article(&self, article: NewArticle) -> Result<Article> {
        self.locked(|| {
            self.require_user(article.author)?;

            let mut sequence = self.next_ids()?;
            let stored = Article {
                id: ArticleId::new(sequence.next_article),
                slug: article.slug,
                title: article.title,
                body: article.body,
                author: article.author,
                created_at: article.created_at.unwrap_or_else(Utc::now),
                tags: article.tags,
                favorited_by: article.favorited_by,
            };
            sequence.next_article += 1;

            self.write_json(&self.article_path(stored.id), &stored)?;
            self.write_json(&self.sequence_path(), &sequence)?;

            debug!(id = %stored.id, "Created article");

            Ok(stored)
        })
    }

    /// Record that `user` favorited `article`.
    #[instrument(skip(self))]
    pub fn favorite(&self, article: ArticleId, user: UserId) -> Result<()> {
        self.locked(|| {
            self.require_user(user)?;

            let path = self.article_path(article);
            let mut stored: Article = self.read_json(&path)?.ok_or_else(|| {
                Error::from(InvalidInputError::Other {
                    message: format!("article {} does not exist", article),
                })
            })?;

            if stored.favorited_by.insert(user) {
                self.write_json(&path, &stored)?;
            }

            Ok(())
        })
    }

    pub fn get_article(&self, id: ArticleId) -> Result<Option<Article>> {
        self.read_json(&self.article_path(id))
    }

    pub fn load_articles(&self) -> Result<Vec<Article>> {
        self.read_all(&self.articles_dir())
    }
}
