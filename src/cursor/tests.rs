use crate::{
    book::Book,
    cursor::{BookCursor, FilteredIterator, TitleOrderIterator},
    error::CatalogError,
};

/// Helper building a bucket where the middle book is checked out
fn bucket_with_gap() -> Vec<Book> {
    let mut books = vec![
        Book::new("Vertigo", "Hitchcock", "movies"),
        Book::new("Alien", "Scott", "movies"),
        Book::new("Memento", "Nolan", "movies"),
    ];
    if let Some(book) = books.get_mut(1) {
        assert!(book.checkout().is_ok());
    }
    books
}

#[test]
fn test_empty_bucket_has_no_next() {
    let mut iter = FilteredIterator::new(&[]);
    assert!(!iter.has_next());
    assert_eq!(iter.get_next(), Err(CatalogError::IteratorExhausted));
}

#[test]
fn test_skips_unavailable_books_in_insertion_order() {
    let books = bucket_with_gap();
    let titles: Vec<&str> = FilteredIterator::new(&books).map(Book::title).collect();
    assert_eq!(titles, vec!["Vertigo", "Memento"]);
}

#[test]
fn test_has_next_does_not_consume() {
    let books = bucket_with_gap();
    let mut iter = FilteredIterator::new(&books);

    assert!(iter.has_next());
    assert!(iter.has_next());
    assert_eq!(iter.get_next().map(Book::title), Ok("Vertigo"));

    // The checked-out book sits between the cursor and the next hit
    assert!(iter.has_next());
    assert_eq!(iter.get_next().map(Book::title), Ok("Memento"));
    assert!(!iter.has_next());
}

#[test]
fn test_exhausted_iterator_reports_error_and_stays_exhausted() {
    let mut books = bucket_with_gap();
    if let Some(book) = books.get_mut(2) {
        assert!(book.checkout().is_ok());
    }
    let mut iter = FilteredIterator::new(&books);

    assert!(iter.get_next().is_ok());
    // Only checked-out books remain after the cursor
    assert!(!iter.has_next());
    assert_eq!(iter.get_next(), Err(CatalogError::IteratorExhausted));
    assert_eq!(iter.get_next(), Err(CatalogError::IteratorExhausted));
}

#[test]
fn test_title_order_sorts_available_books() {
    let mut books = bucket_with_gap();
    books.push(Book::new("Casablanca", "Curtiz", "movies"));

    let mut iter = TitleOrderIterator::new(&books);
    let mut titles = Vec::new();
    while iter.has_next() {
        if let Ok(book) = iter.get_next() {
            titles.push(book.title());
        }
    }

    assert_eq!(titles, vec!["Casablanca", "Memento", "Vertigo"]);
    assert_eq!(iter.get_next(), Err(CatalogError::IteratorExhausted));
}

#[test]
fn test_title_order_keeps_insertion_order_for_equal_titles() {
    let books = vec![
        Book::new("Dune", "Herbert", "scifi"),
        Book::new("Dune", "Anderson", "scifi"),
        Book::new("Contact", "Sagan", "scifi"),
    ];

    let mut iter = TitleOrderIterator::new(&books);
    let mut authors = Vec::new();
    while let Ok(book) = iter.get_next() {
        authors.push(book.author());
    }

    assert_eq!(authors, vec!["Sagan", "Herbert", "Anderson"]);
}
