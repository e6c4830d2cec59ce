//! Inventory domain module.
//!
//! Holds the book model and the in-memory catalog that guards every quantity
//! transition. No IO, no HTTP.

pub mod book;
pub mod catalog;

pub use book::{Book, BookId, NewBook};
pub use catalog::{Catalog, seed_books};
