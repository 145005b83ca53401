//! Traits implemented by the persistence collaborator.

mod directory;
mod source;

pub use directory::Directory;
pub use source::{ArticleSource, Window};
