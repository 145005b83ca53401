//! pagefeed-file - Filesystem-backed article store.

mod catalog;
mod seed;
mod store;

pub use catalog::FileCatalog;
pub use seed::{ImportSummary, Seed, SeedArticle, SeedUser, import_seed};
pub use store::{FileStore, NewArticle};
