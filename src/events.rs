use serde::{Deserialize, Serialize};

/// Something that happened to the books of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CatalogEvent {
    /// A book was added to a genre bucket
    BookAdded { genre: String, title: String },
    /// A book was checked out
    CheckedOut { genre: String, title: String },
    /// A checkout was refused because the book was already out
    CheckoutRefused { genre: String, title: String },
    /// A book was returned
    Returned { genre: String, title: String },
    /// A return matched no book in the genre
    ReturnMissed { genre: String, title: String },
}

impl CatalogEvent {
    /// Title of the book the event is about
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::BookAdded { title, .. }
            | Self::CheckedOut { title, .. }
            | Self::CheckoutRefused { title, .. }
            | Self::Returned { title, .. }
            | Self::ReturnMissed { title, .. } => title,
        }
    }
}
