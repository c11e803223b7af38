use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A single catalog item and its availability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Book {
    /// Title used for exact-match lookups
    title: String,
    /// Author, only used for display
    author: String,
    /// Genre bucket this book belongs to, fixed at construction
    genre: String,
    /// Whether the book can currently be checked out
    available: bool,
}

impl Book {
    /// Create a new book that starts out available
    #[must_use]
    pub fn new(title: &str, author: &str, genre: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            available: true,
        }
    }

    /// Whether the book can be checked out right now
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Check the book out
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BookNotAvailable` if the book is already checked
    /// out. The book is left untouched in that case.
    pub fn checkout(&mut self) -> Result<(), CatalogError> {
        if !self.available {
            return Err(CatalogError::BookNotAvailable { title: self.title.clone() });
        }
        self.available = false;
        Ok(())
    }

    /// Mark the book as available again. Returning an available book is a no-op.
    pub fn return_book(&mut self) {
        self.available = true;
    }

    /// Get the genre bucket this book belongs to
    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Get the title used for lookups
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Human-readable rendering: `<title> by <author> (<genre>)`
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.genre)
    }
}
