use uuid::Uuid;

use crate::domain::book::{self, Book, NewBook};
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookCatalog, Bookstore};

pub struct BookService<S> {
    store: S,
}

impl<S: Bookstore> BookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a book after field validation; the catalog assigns the id.
    pub fn add_book(&self, new_book: NewBook) -> Result<Book, DomainError> {
        let errors = book::validate(&new_book);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        self.store.transaction(|tx| {
            let book = tx.insert_book(new_book)?;
            log::info!("book {} added to catalog: {}", book.id, book.name);
            Ok(book)
        })
    }

    pub fn get_book(&self, id: Uuid) -> Result<Option<Book>, DomainError> {
        self.store.transaction(|tx| Ok(tx.find_book(id)?))
    }

    pub fn get_all_books(&self) -> Result<Vec<Book>, DomainError> {
        self.store.transaction(|tx| Ok(tx.all_books()?))
    }

    /// Removes a book from the catalog. Existing orders keep their
    /// line items; only future orders and stock restoration notice.
    pub fn delete_book(&self, id: Uuid) -> Result<bool, DomainError> {
        self.store.transaction(|tx| {
            let deleted = tx.delete_book(id)?;
            if deleted {
                log::info!("book {} removed from catalog", id);
            }
            Ok(deleted)
        })
    }
}
