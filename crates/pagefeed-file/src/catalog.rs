//! Trait implementations over the file store.

use async_trait::async_trait;
use tracing::instrument;

use pagefeed_core::error::{Error, StorageError};
use pagefeed_core::{
    Article, ArticleFilter, ArticleSource, Directory, Profile, Result, TagId, UserId, Username,
    Window,
};

use crate::store::FileStore;

/// Filesystem-backed article catalog.
///
/// Every call reads the current documents from disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    store: FileStore,
}

impl FileCatalog {
    /// Create a catalog over the store rooted at `root`.
    pub fn new(root: impl AsRef<std::path::Path>) -> Self {
        Self::from_store(FileStore::new(root))
    }

    pub fn from_store(store: FileStore) -> Self {
        Self { store }
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Run a blocking store read off the async executor.
    async fn read<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&FileStore) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| {
                Error::Storage(StorageError::Io {
                    message: format!("store read task failed: {}", e),
                })
            })?
    }
}

#[async_trait]
impl Directory for FileCatalog {
    #[instrument(skip(self))]
    async fn find_tag(&self, name: &str) -> Result<Option<TagId>> {
        let name = name.to_string();
        self.read(move |store| {
            Ok(store
                .load_articles()?
                .into_iter()
                .flat_map(|a| a.tags)
                .find(|t| t.as_str() == name))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_user(&self, username: &Username) -> Result<Option<Profile>> {
        let username = username.clone();
        self.read(move |store| store.find_user_by_username(&username))
            .await
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<Profile>> {
        self.read(move |store| store.get_user(id)).await
    }
}

#[async_trait]
impl ArticleSource for FileCatalog {
    #[instrument(skip(self))]
    async fn count(&self, filter: &ArticleFilter) -> Result<u64> {
        let filter = filter.clone();
        self.read(move |store| {
            let articles = store.load_articles()?;
            Ok(articles.iter().filter(|a| filter.matches(a)).count() as u64)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn fetch(&self, filter: &ArticleFilter, window: &Window) -> Result<Vec<Article>> {
        let filter = filter.clone();
        let window = *window;
        self.read(move |store| Ok(window.select(store.load_articles()?, &filter)))
            .await
    }
}
