//! Traversal over the books of a single genre bucket.
//!
//! Both strategies here only surface books that are available when they are
//! visited, and both borrow the bucket rather than copying it.

use crate::{book::Book, error::CatalogError};

/// Forward-only traversal over books
pub trait BookCursor<'a> {
    /// Whether another book can be handed out. Never advances the cursor.
    fn has_next(&self) -> bool;

    /// Hand out the next book and advance past it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IteratorExhausted` if `has_next` would have
    /// returned `false`. The cursor does not move in that case.
    fn get_next(&mut self) -> Result<&'a Book, CatalogError>;
}

/// Order in which a genre's books are traversed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Order in which books were added to the catalog
    #[default]
    Insertion,
    /// Alphabetical by title, insertion order breaking ties
    Title,
}

/// Lazily skips unavailable books, preserving insertion order
#[derive(Debug, Clone)]
pub struct FilteredIterator<'a> {
    /// The genre bucket being traversed
    books: &'a [Book],
    /// Index of the first entry not yet visited
    cursor: usize,
}

impl<'a> FilteredIterator<'a> {
    /// Start a traversal at the first book of the bucket
    #[must_use]
    pub fn new(books: &'a [Book]) -> Self {
        Self { books, cursor: 0 }
    }

    /// Index of the next available book at or after the cursor
    fn peek_position(&self) -> Option<usize> {
        let rest = self.books.get(self.cursor..)?;
        let offset = rest.iter().position(Book::is_available)?;
        self.cursor.checked_add(offset)
    }
}

impl<'a> BookCursor<'a> for FilteredIterator<'a> {
    fn has_next(&self) -> bool {
        self.peek_position().is_some()
    }

    fn get_next(&mut self) -> Result<&'a Book, CatalogError> {
        let books = self.books;
        let position = self.peek_position().ok_or(CatalogError::IteratorExhausted)?;
        let book = books.get(position).ok_or(CatalogError::IteratorExhausted)?;
        self.cursor = position.saturating_add(1);
        Ok(book)
    }
}

impl<'a> Iterator for FilteredIterator<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next().ok()
    }
}

/// Available books of a bucket, sorted by title
///
/// The set of books is fixed when the iterator is created.
#[derive(Debug, Clone)]
pub struct TitleOrderIterator<'a> {
    /// Available books, already sorted
    books: Vec<&'a Book>,
    /// Index of the next book to hand out
    cursor: usize,
}

impl<'a> TitleOrderIterator<'a> {
    /// Snapshot and sort the books that are available right now
    #[must_use]
    pub fn new(books: &'a [Book]) -> Self {
        let mut ordered: Vec<&'a Book> = books.iter().filter(|book| book.is_available()).collect();
        // sort_by is stable, so equal titles keep insertion order
        ordered.sort_by(|left, right| left.title().cmp(right.title()));
        Self { books: ordered, cursor: 0 }
    }
}

impl<'a> BookCursor<'a> for TitleOrderIterator<'a> {
    fn has_next(&self) -> bool {
        self.cursor < self.books.len()
    }

    fn get_next(&mut self) -> Result<&'a Book, CatalogError> {
        let book = self.books.get(self.cursor).copied().ok_or(CatalogError::IteratorExhausted)?;
        self.cursor = self.cursor.saturating_add(1);
        Ok(book)
    }
}

#[cfg(test)]
mod tests;
