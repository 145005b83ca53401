//! Command implementations.

pub mod articles;
pub mod cursor;
pub mod store;
