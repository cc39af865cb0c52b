use std::collections::HashSet;

use serde_json::json;
use uuid::Uuid;

use crate::domain::errors::{DomainError, FieldErrors};
use crate::domain::order::{order_total, BookItem, LineItem, NewOrder, Order, OrderStatus};
use crate::domain::ports::{BookCatalog, Bookstore, OrderStore, UserDirectory};

pub struct OrderService<S> {
    store: S,
}

impl<S: Bookstore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places an order for `user_id`, reserving stock for every
    /// requested book inside one transaction.
    ///
    /// The request is checked in a fixed sequence, and the first
    /// failing check aborts the whole order: the item list itself
    /// (non-empty, unique book ids, positive quantities), then book
    /// existence, then stock coverage, then user existence. Stock is
    /// only decremented after every check has passed, so a refused
    /// order never leaves a partial reservation behind.
    pub fn create_order(&self, user_id: Uuid, items: Vec<BookItem>) -> Result<Order, DomainError> {
        self.store.transaction(|tx| {
            validate_items(&items)?;

            // Lock every requested book row up front. Missing books are
            // collected rather than reported one at a time.
            let mut missing = FieldErrors::new();
            let mut books = Vec::with_capacity(items.len());
            for item in &items {
                match tx.find_book_for_update(item.book_id)? {
                    Some(book) => books.push(book),
                    None => missing.add("books[].bookId", "Book doesn't exist", json!(item.book_id)),
                }
            }
            if !missing.is_empty() {
                return Err(DomainError::Validation(missing));
            }

            let mut shortages = FieldErrors::new();
            for (item, book) in items.iter().zip(&books) {
                if item.quantity > book.quantity_in_stock {
                    shortages.add(
                        "quantity",
                        format!("Not enough books in stock with id: {}", book.id),
                        json!(item.quantity),
                    );
                }
            }
            if !shortages.is_empty() {
                return Err(DomainError::Validation(shortages));
            }

            if tx.find_user(user_id)?.is_none() {
                return Err(DomainError::field(
                    "userId",
                    "User doesn't exist",
                    json!(user_id),
                ));
            }

            // All checks passed: reserve stock and snapshot prices.
            let mut line_items = Vec::with_capacity(items.len());
            for (item, mut book) in items.iter().zip(books) {
                book.quantity_in_stock -= item.quantity;
                tx.save_book(&book)?;
                line_items.push(LineItem {
                    book_id: book.id,
                    quantity: item.quantity,
                    unit_price: book.unit_price,
                });
            }

            let total_payment = order_total(&line_items);
            let order = tx.insert_order(NewOrder {
                user_id,
                total_payment,
                status: OrderStatus::Pending,
                items: line_items,
            })?;
            log::info!(
                "order {} created for user {} ({} items, total {})",
                order.id,
                order.user_id,
                order.items.len(),
                order.total_payment
            );
            Ok(order)
        })
    }

    /// Marks a pending order as paid. Paying an already paid order is
    /// refused; there is no way back from `PAID`.
    pub fn pay_order(&self, id: Uuid) -> Result<Order, DomainError> {
        self.store.transaction(|tx| {
            let order = tx.find_order(id)?.ok_or(DomainError::OrderNotExist)?;
            if order.status == OrderStatus::Paid {
                return Err(DomainError::field(
                    "id",
                    "Order status was already PAID",
                    json!(id),
                ));
            }
            tx.update_order_status(id, OrderStatus::Paid)?;
            log::info!("order {} paid", id);
            Ok(Order {
                status: OrderStatus::Paid,
                ..order
            })
        })
    }

    /// Cancels an order and returns its reserved stock to the catalog.
    /// Books that have been deleted from the catalog since the order
    /// was placed are skipped with a warning; their stock is simply
    /// gone, which must not block the cancellation.
    pub fn cancel_order(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.transaction(|tx| {
            let order = tx.find_order(id)?.ok_or(DomainError::OrderNotExist)?;
            for item in &order.items {
                match tx.find_book_for_update(item.book_id)? {
                    Some(mut book) => {
                        book.quantity_in_stock += item.quantity;
                        tx.save_book(&book)?;
                    }
                    None => log::warn!(
                        "cancelling order {}: book {} no longer exists, not restoring {} copies",
                        id,
                        item.book_id,
                        item.quantity
                    ),
                }
            }
            tx.delete_order(id)?;
            log::info!("order {} cancelled", id);
            Ok(())
        })
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.store.transaction(|tx| Ok(tx.find_order(id)?))
    }

    pub fn get_all_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.store.transaction(|tx| Ok(tx.all_orders()?))
    }

    /// Lists a user's orders, newest first. Asking for an unknown user
    /// is reported as a field error on `userId`.
    pub fn get_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.store.transaction(|tx| {
            if tx.find_user(user_id)?.is_none() {
                return Err(DomainError::field(
                    "userId",
                    "User doesn't exist",
                    json!(user_id),
                ));
            }
            Ok(tx.orders_by_user(user_id)?)
        })
    }
}

/// Checks the shape of the requested item list before any store access:
/// the list must be non-empty, book ids must be unique, and every
/// quantity must be at least 1.
fn validate_items(items: &[BookItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::field(
            "books",
            "Order must contain at least one book",
            json!([]),
        ));
    }
    let mut seen = HashSet::new();
    let mut errors = FieldErrors::new();
    for item in items {
        if !seen.insert(item.book_id) {
            errors.add("books", "Book id is not unique", json!(item.book_id));
        }
        if item.quantity < 1 {
            errors.add("quantity", "Quantity must be at least 1", json!(item.quantity));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}
