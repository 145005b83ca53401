//! Listed entities and the listing request.
//!
//! Articles and profiles are owned by the persistence collaborator; the
//! engine only reads them for the duration of one request.

pub(crate) mod query;
mod types;

pub use query::ArticleQuery;
pub use types::{Article, Profile};
