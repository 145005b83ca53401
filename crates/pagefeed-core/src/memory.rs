//! In-memory catalog.

use async_trait::async_trait;

use crate::Result;
use crate::article::{Article, Profile};
use crate::filter::ArticleFilter;
use crate::traits::{ArticleSource, Directory, Window};
use crate::types::{TagId, UserId, Username};

/// A directory and article source over vectors held in memory.
///
/// Useful when a snapshot of the collection is already loaded, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    users: Vec<Profile>,
    articles: Vec<Article>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(users: Vec<Profile>, articles: Vec<Article>) -> Self {
        Self { users, articles }
    }

    pub fn add_user(&mut self, profile: Profile) {
        self.users.push(profile);
    }

    pub fn add_article(&mut self, article: Article) {
        self.articles.push(article);
    }

    pub fn users(&self) -> &[Profile] {
        &self.users
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }
}

#[async_trait]
impl Directory for MemoryCatalog {
    async fn find_tag(&self, name: &str) -> Result<Option<TagId>> {
        Ok(self
            .articles
            .iter()
            .flat_map(|a| a.tags.iter())
            .find(|t| t.as_str() == name)
            .cloned())
    }

    async fn find_user(&self, username: &Username) -> Result<Option<Profile>> {
        Ok(self
            .users
            .iter()
            .find(|p| &p.username == username)
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<Profile>> {
        Ok(self.users.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ArticleSource for MemoryCatalog {
    async fn count(&self, filter: &ArticleFilter) -> Result<u64> {
        Ok(self.articles.iter().filter(|a| filter.matches(a)).count() as u64)
    }

    async fn fetch(&self, filter: &ArticleFilter, window: &Window) -> Result<Vec<Article>> {
        Ok(window.select(self.articles.iter().cloned(), filter))
    }
}
