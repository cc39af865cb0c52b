use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::book::{Book, NewBook};
use crate::domain::errors::{DomainError, StoreError};
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::{BookCatalog, Bookstore, OrderStore, UserDirectory};
use crate::domain::user::{NewUser, User};

/// Mutable view of the in-memory state, handed to transaction closures.
#[derive(Debug, Clone, Default)]
pub struct MemoryTx {
    books: HashMap<Uuid, Book>,
    users: HashMap<Uuid, User>,
    orders: HashMap<Uuid, Order>,
}

/// In-memory store for tests and database-less local runs. A global
/// mutex serializes transactions, which also makes
/// `find_book_for_update` trivially correct: no other writer can touch
/// the store while a closure runs. Rollback restores a snapshot taken
/// when the transaction began.
#[derive(Clone, Default)]
pub struct MemoryBookstore {
    state: Arc<Mutex<MemoryTx>>,
}

impl MemoryBookstore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Bookstore for MemoryBookstore {
    type Tx = MemoryTx;

    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut MemoryTx) -> Result<T, DomainError>,
    {
        let mut state = self.state.lock().expect("bookstore mutex poisoned");
        let snapshot = state.clone();
        match f(&mut state) {
            Ok(value) => Ok(value),
            Err(e) => {
                *state = snapshot;
                Err(e)
            }
        }
    }
}

impl BookCatalog for MemoryTx {
    fn insert_book(&mut self, new_book: NewBook) -> Result<Book, StoreError> {
        let book = Book {
            id: Uuid::new_v4(),
            name: new_book.name,
            unit_price: new_book.unit_price,
            quantity_in_stock: new_book.quantity_in_stock,
        };
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    fn find_book(&mut self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(&id).cloned())
    }

    fn find_book_for_update(&mut self, id: Uuid) -> Result<Option<Book>, StoreError> {
        // The store-wide mutex already excludes concurrent writers.
        self.find_book(id)
    }

    fn save_book(&mut self, book: &Book) -> Result<(), StoreError> {
        self.books.insert(book.id, book.clone());
        Ok(())
    }

    fn all_books(&mut self) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }

    fn delete_book(&mut self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.books.remove(&id).is_some())
    }
}

impl UserDirectory for MemoryTx {
    fn insert_user(&mut self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user(&mut self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).cloned())
    }

    fn all_users(&mut self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    fn delete_user(&mut self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.remove(&id).is_some())
    }
}

impl OrderStore for MemoryTx {
    fn insert_order(&mut self, new_order: NewOrder) -> Result<Order, StoreError> {
        let order = Order {
            id: Uuid::new_v4(),
            user_id: new_order.user_id,
            total_payment: new_order.total_payment,
            status: new_order.status,
            items: new_order.items,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn find_order(&mut self, id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&id).cloned())
    }

    fn update_order_status(&mut self, id: Uuid, status: OrderStatus) -> Result<(), StoreError> {
        if let Some(order) = self.orders.get_mut(&id) {
            order.status = status;
        }
        Ok(())
    }

    fn delete_order(&mut self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.orders.remove(&id).is_some())
    }

    fn all_orders(&mut self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.orders.values().cloned().collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    fn orders_by_user(&mut self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }
}

// Matches the listing order of the Postgres store; the id tiebreak only
// keeps same-instant inserts deterministic.
fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
