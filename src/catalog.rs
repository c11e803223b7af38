use std::{collections::HashMap, fmt};

use tracing::{debug, info, warn};

use crate::{
    book::Book,
    cursor::{BookCursor, FilteredIterator, TitleOrderIterator, TraversalOrder},
    error::CatalogError,
    events::CatalogEvent,
    observers::CatalogObserver,
};

/// Outcome of a checkout request
///
/// A checkout never fails the caller; refusals are counted here instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutReport {
    /// Books in the genre whose title matched
    pub matched: usize,
    /// Matches that were checked out by this request
    pub checked_out: usize,
    /// Matches that were already checked out
    pub refused: usize,
}

impl CheckoutReport {
    /// True when the genre or title matched nothing
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.matched == 0
    }
}

/// Books grouped by genre
///
/// The catalog owns every book it holds. Each genre bucket keeps its books
/// in insertion order, and a book only ever lives in the bucket named by its
/// own genre.
#[derive(Default)]
pub struct Catalog {
    /// Genre name to the books of that genre
    genre_index: HashMap<String, Vec<Book>>,
    /// Registered activity observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

// Observers are trait objects without Debug
impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("genre_index", &self.genre_index)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

/// Hand an event to every observer, in registration order
fn notify(observers: &[Box<dyn CatalogObserver>], event: &CatalogEvent) {
    for observer in observers {
        observer.on_event(event);
    }
}

impl Catalog {
    /// Create an empty catalog with no observers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer to be notified of catalog activity
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Append a book to its genre bucket, creating the bucket if needed.
    /// Duplicate titles are kept as separate entries.
    pub fn add_book(&mut self, book: Book) {
        debug!(genre = book.genre(), title = book.title(), "adding book");
        let event = CatalogEvent::BookAdded {
            genre: book.genre().to_string(),
            title: book.title().to_string(),
        };
        self.genre_index.entry(book.genre().to_string()).or_default().push(book);
        notify(&self.observers, &event);
    }

    /// Books of a genre, empty for an unknown genre
    fn bucket(&self, genre: &str) -> &[Book] {
        self.genre_index.get(genre).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over the available books of a genre in insertion order
    ///
    /// An unknown genre gives an iterator with nothing in it.
    #[must_use]
    pub fn genre_iterator(&self, genre: &str) -> FilteredIterator<'_> {
        FilteredIterator::new(self.bucket(genre))
    }

    /// Traverse the available books of a genre with the given strategy
    #[must_use]
    pub fn genre_cursor(&self, genre: &str, order: TraversalOrder) -> Box<dyn BookCursor<'_> + '_> {
        let books = self.bucket(genre);
        match order {
            TraversalOrder::Insertion => Box::new(FilteredIterator::new(books)),
            TraversalOrder::Title => Box::new(TitleOrderIterator::new(books)),
        }
    }

    /// First book in the genre with exactly this title
    #[must_use]
    pub fn search_collection(&self, genre: &str, title: &str) -> Option<&Book> {
        self.bucket(genre).iter().find(|book| book.title() == title)
    }

    /// Check out every book in the genre with this title
    ///
    /// Matches that are already out are logged and counted as refused; they do
    /// not stop the remaining matches from being processed.
    pub fn checkout_book(&mut self, genre: &str, title: &str) -> CheckoutReport {
        let mut report = CheckoutReport::default();
        let Some(books) = self.genre_index.get_mut(genre) else {
            debug!(genre, title, "checkout for unknown genre ignored");
            return report;
        };

        for book in books.iter_mut().filter(|book| book.title() == title) {
            report.matched = report.matched.saturating_add(1);
            match book.checkout() {
                Ok(()) => {
                    info!(genre, title, "book checked out");
                    report.checked_out = report.checked_out.saturating_add(1);
                    notify(
                        &self.observers,
                        &CatalogEvent::CheckedOut {
                            genre: genre.to_string(),
                            title: title.to_string(),
                        },
                    );
                }
                Err(err) => {
                    warn!(genre, title, error = %err, "checkout refused");
                    report.refused = report.refused.saturating_add(1);
                    notify(
                        &self.observers,
                        &CatalogEvent::CheckoutRefused {
                            genre: genre.to_string(),
                            title: title.to_string(),
                        },
                    );
                }
            }
        }

        if report.is_noop() {
            debug!(genre, title, "checkout matched no book");
        }
        report
    }

    /// Mark every book in the genre with this title as available
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BookNotFound` if no book in the genre has the
    /// title, including when the genre itself is unknown.
    pub fn return_book(&mut self, genre: &str, title: &str) -> Result<(), CatalogError> {
        let mut returned = 0_usize;
        if let Some(books) = self.genre_index.get_mut(genre) {
            for book in books.iter_mut().filter(|book| book.title() == title) {
                book.return_book();
                returned = returned.saturating_add(1);
                notify(
                    &self.observers,
                    &CatalogEvent::Returned { genre: genre.to_string(), title: title.to_string() },
                );
            }
        }

        if returned == 0 {
            warn!(genre, title, "return matched no book");
            notify(
                &self.observers,
                &CatalogEvent::ReturnMissed { genre: genre.to_string(), title: title.to_string() },
            );
            return Err(CatalogError::BookNotFound {
                genre: genre.to_string(),
                title: title.to_string(),
            });
        }

        info!(genre, title, count = returned, "book returned");
        Ok(())
    }

    /// Names of all genres holding at least one book, sorted
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = self.genre_index.keys().map(String::as_str).collect();
        genres.sort_unstable();
        genres
    }

    /// Total number of books across all genres
    #[must_use]
    pub fn len(&self) -> usize {
        self.genre_index.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no books at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genre_index.values().all(Vec::is_empty)
    }
}
