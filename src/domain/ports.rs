use uuid::Uuid;

use super::book::{Book, NewBook};
use super::errors::{DomainError, StoreError};
use super::order::{NewOrder, Order, OrderStatus};
use super::user::{NewUser, User};

/// Catalog access within a transaction.
pub trait BookCatalog {
    fn insert_book(&mut self, new_book: NewBook) -> Result<Book, StoreError>;
    fn find_book(&mut self, id: Uuid) -> Result<Option<Book>, StoreError>;
    /// Like [`find_book`](Self::find_book), but the returned row stays
    /// locked against concurrent writers until the transaction ends.
    fn find_book_for_update(&mut self, id: Uuid) -> Result<Option<Book>, StoreError>;
    fn save_book(&mut self, book: &Book) -> Result<(), StoreError>;
    fn all_books(&mut self) -> Result<Vec<Book>, StoreError>;
    /// Returns whether a row was actually deleted.
    fn delete_book(&mut self, id: Uuid) -> Result<bool, StoreError>;
}

/// User registry access within a transaction.
pub trait UserDirectory {
    fn insert_user(&mut self, new_user: NewUser) -> Result<User, StoreError>;
    fn find_user(&mut self, id: Uuid) -> Result<Option<User>, StoreError>;
    fn all_users(&mut self) -> Result<Vec<User>, StoreError>;
    fn delete_user(&mut self, id: Uuid) -> Result<bool, StoreError>;
}

/// Order persistence within a transaction.
pub trait OrderStore {
    fn insert_order(&mut self, new_order: NewOrder) -> Result<Order, StoreError>;
    fn find_order(&mut self, id: Uuid) -> Result<Option<Order>, StoreError>;
    fn update_order_status(&mut self, id: Uuid, status: OrderStatus) -> Result<(), StoreError>;
    fn delete_order(&mut self, id: Uuid) -> Result<bool, StoreError>;
    fn all_orders(&mut self) -> Result<Vec<Order>, StoreError>;
    fn orders_by_user(&mut self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
}

/// A backing store that can run closures transactionally. Everything
/// the closure does through `Tx` commits together on `Ok` and rolls
/// back together on `Err`.
pub trait Bookstore: Send + Sync + 'static {
    type Tx: BookCatalog + UserDirectory + OrderStore;

    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Self::Tx) -> Result<T, DomainError>;
}
