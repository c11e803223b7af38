use std::{cell::RefCell, fmt, rc::Rc};

use tracing::warn;

use crate::{
    catalog::{Catalog, CheckoutReport},
    error::CatalogError,
};

/// Something a user should be told about instead of seeing an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A return matched no book
    BookNotFound { genre: String, title: String },
    /// Someone else holds a borrow of the shared catalog
    CatalogBusy,
    /// The catalog rejected the request for another reason
    Failed(CatalogError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookNotFound { genre, title } => {
                write!(f, "Book is not found: {title} ({genre})")
            }
            Self::CatalogBusy => write!(f, "The catalog is busy, try again"),
            Self::Failed(err) => write!(f, "Request failed: {err}"),
        }
    }
}

/// A named patron acting on a shared catalog
#[derive(Debug, Clone)]
pub struct User {
    /// Display name
    name: String,
    /// Catalog shared with other users and the caller
    catalog: Rc<RefCell<Catalog>>,
}

impl User {
    /// Create a user acting on the given catalog
    #[must_use]
    pub fn new(name: &str, catalog: Rc<RefCell<Catalog>>) -> Self {
        Self { name: name.to_string(), catalog }
    }

    /// Get the user's display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward a checkout to the catalog
    ///
    /// # Errors
    ///
    /// Returns `Notice::CatalogBusy` if the shared catalog is currently
    /// borrowed elsewhere. Nothing is checked out in that case.
    pub fn checkout_book(&self, genre: &str, title: &str) -> Result<CheckoutReport, Notice> {
        let Ok(mut catalog) = self.catalog.try_borrow_mut() else {
            warn!(user = %self.name, genre, title, "checkout while catalog is borrowed");
            return Err(Notice::CatalogBusy);
        };
        Ok(catalog.checkout_book(genre, title))
    }

    /// Forward a return to the catalog
    ///
    /// A missing book does not propagate as an error. It comes back as a
    /// `Notice` for the user instead, as does a catalog that is currently
    /// borrowed elsewhere.
    pub fn return_book(&self, genre: &str, title: &str) -> Option<Notice> {
        let Ok(mut catalog) = self.catalog.try_borrow_mut() else {
            warn!(user = %self.name, genre, title, "return while catalog is borrowed");
            return Some(Notice::CatalogBusy);
        };
        match catalog.return_book(genre, title) {
            Ok(()) => None,
            Err(CatalogError::BookNotFound { genre, title }) => {
                warn!(user = %self.name, genre = %genre, title = %title, "return of unknown book");
                Some(Notice::BookNotFound { genre, title })
            }
            Err(err @ (CatalogError::BookNotAvailable { .. } | CatalogError::IteratorExhausted)) => {
                warn!(user = %self.name, error = %err, "return failed");
                Some(Notice::Failed(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;

    /// Helper sharing a one-book catalog with a user
    fn setup_user() -> (User, Rc<RefCell<Catalog>>) {
        let catalog = Rc::new(RefCell::new(Catalog::new()));
        catalog.borrow_mut().add_book(Book::new("Moonlight", "Unknown", "movies"));
        (User::new("Johnny", Rc::clone(&catalog)), catalog)
    }

    #[test]
    fn test_user_checkout_and_return_reach_catalog() {
        let (user, catalog) = setup_user();
        assert_eq!(user.name(), "Johnny");

        let report = user.checkout_book("movies", "Moonlight");
        assert_eq!(report.map(|report| report.checked_out), Ok(1));
        assert!(
            catalog
                .borrow()
                .search_collection("movies", "Moonlight")
                .is_some_and(|book| !book.is_available())
        );

        assert_eq!(user.return_book("movies", "Moonlight"), None);
        assert!(
            catalog.borrow().search_collection("movies", "Moonlight").is_some_and(Book::is_available)
        );
    }

    #[test]
    fn test_missing_return_becomes_notice() {
        let (user, _catalog) = setup_user();

        let notice = user.return_book("movies", "Vertigo");
        assert_eq!(
            notice,
            Some(Notice::BookNotFound { genre: "movies".to_string(), title: "Vertigo".to_string() })
        );
        assert_eq!(
            notice.map(|notice| notice.to_string()).as_deref(),
            Some("Book is not found: Vertigo (movies)")
        );
    }

    #[test]
    fn test_users_share_one_catalog() {
        let (alice, catalog) = setup_user();
        let bob = User::new("Bob", Rc::clone(&catalog));

        assert_eq!(alice.checkout_book("movies", "Moonlight").map(|report| report.checked_out), Ok(1));
        assert_eq!(bob.checkout_book("movies", "Moonlight").map(|report| report.refused), Ok(1));
    }

    #[test]
    fn test_borrowed_catalog_is_reported_as_busy() {
        let (user, catalog) = setup_user();

        {
            // A listing keeps the catalog borrowed while the user acts
            let listing = catalog.borrow();
            let mut books = listing.genre_iterator("movies");
            assert!(books.next().is_some());

            assert_eq!(user.checkout_book("movies", "Moonlight"), Err(Notice::CatalogBusy));
            assert_eq!(user.return_book("movies", "Moonlight"), Some(Notice::CatalogBusy));
        }

        // Nothing changed while the catalog was busy
        assert!(
            catalog.borrow().search_collection("movies", "Moonlight").is_some_and(Book::is_available)
        );
        assert_eq!(user.checkout_book("movies", "Moonlight").map(|report| report.checked_out), Ok(1));
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::CatalogBusy.to_string(), "The catalog is busy, try again");
        assert_eq!(
            Notice::Failed(CatalogError::IteratorExhausted).to_string(),
            "Request failed: No available book left in this traversal"
        );
    }
}
