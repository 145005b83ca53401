//! pagefeed-core - Article filtering and hybrid pagination.
//!
//! Lists articles newest first, optionally filtered by tag, author,
//! favoriting user, or the current user's follows, with cursor paging and a
//! legacy offset fallback in one query path.
//!
//! # Example
//!
//! ```
//! use pagefeed_core::{ArticleQuery, MemoryCatalog, list_articles};
//!
//! # async fn example() -> pagefeed_core::Result<()> {
//! let catalog = MemoryCatalog::new();
//! let page = list_articles(&catalog, &catalog, &ArticleQuery::new().limit(10)).await?;
//!
//! if let Some(cursor) = page.next_cursor {
//!     let query = ArticleQuery::new().limit(10).cursor(cursor);
//!     let next = list_articles(&catalog, &catalog, &query).await?;
//!     println!("{} more", next.items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod article;
pub mod cursor;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod listing;
pub mod memory;
pub mod paginate;
pub mod traits;
pub mod types;

pub use article::{Article, ArticleQuery, Profile};
pub use cursor::CursorKey;
pub use envelope::ArticlesPage;
pub use error::Error;
pub use filter::{ArticleFilter, Constraint, FilterPlan};
pub use listing::list_articles;
pub use memory::MemoryCatalog;
pub use paginate::{DEFAULT_LIMIT, PageRequest, Position};
pub use traits::{ArticleSource, Directory, Window};
pub use types::{ArticleId, TagId, UserId, Username};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
