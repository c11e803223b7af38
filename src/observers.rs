use std::{cell::RefCell, rc::Rc};

use crate::events::CatalogEvent;

/// Trait for catalog activity observation
pub trait CatalogObserver {
    /// Called after every add, checkout, refusal, return, or missed return
    fn on_event(&self, event: &CatalogEvent);
}

/// Records every event it sees
///
/// Clones share the same record, so a caller can keep one handle and give
/// another to the catalog.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    /// Events in the order they were observed
    entries: Rc<RefCell<Vec<CatalogEvent>>>,
}

impl ActivityLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEvent> {
        self.entries.borrow().clone()
    }

    /// Number of events recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no event has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CatalogObserver for ActivityLog {
    fn on_event(&self, event: &CatalogEvent) {
        self.entries.borrow_mut().push(event.clone());
    }
}
