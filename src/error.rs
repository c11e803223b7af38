use thiserror::Error;

/// Errors raised by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The book is already checked out
    #[error("Book is not available: {title}")]
    BookNotAvailable {
        /// Title of the book that was refused
        title: String,
    },
    /// No book in the genre carries the requested title
    #[error("Book is not found: {title} ({genre})")]
    BookNotFound {
        /// Genre that was searched
        genre: String,
        /// Title that was searched for
        title: String,
    },
    /// `get_next` was called after the last available book was handed out
    #[error("No available book left in this traversal")]
    IteratorExhausted,
}
