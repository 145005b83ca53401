//! Core pagefeed types.
//!
//! Identifiers are plain newtypes; names coming from requests are validated
//! at construction so a malformed one can never reach a lookup.

mod ids;
mod tag;
mod username;

pub use ids::{ArticleId, UserId};
pub use tag::TagId;
pub use username::Username;
