//! In-memory library catalog for tracking which books can be checked out.
//!
//! Books are grouped into genre buckets owned by a [`Catalog`]. Callers list
//! the available books of a genre through a [`BookCursor`], search by exact
//! title, and check books in and out either directly or through a [`User`].

pub mod book;
pub mod catalog;
pub mod cursor;
pub mod error;
pub mod events;
pub mod observers;
pub mod user;

pub use book::Book;
pub use catalog::{Catalog, CheckoutReport};
pub use cursor::{BookCursor, FilteredIterator, TitleOrderIterator, TraversalOrder};
pub use error::CatalogError;
pub use events::CatalogEvent;
pub use observers::{ActivityLog, CatalogObserver};
pub use user::{Notice, User};
