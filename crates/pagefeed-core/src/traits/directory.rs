//! Lookup trait used by filter composition.

use async_trait::async_trait;

use crate::Result;
use crate::article::Profile;
use crate::types::{TagId, UserId, Username};

/// Resolves names referenced by filter criteria.
///
/// A missing entity is `Ok(None)`; `Err` is reserved for failures of the
/// backing store.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve a tag name to its identifier, if any article uses it.
    async fn find_tag(&self, name: &str) -> Result<Option<TagId>>;

    /// Look up an account by username.
    async fn find_user(&self, username: &Username) -> Result<Option<Profile>>;

    /// Look up an account by identifier. The profile carries the
    /// following set used by feed mode.
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<Profile>>;
}
