//! End-to-end order workflow over the in-memory store: the same
//! services the HTTP layer uses, without the HTTP layer.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::json;
use uuid::Uuid;

use bookstore_service::domain::book::{Book, NewBook};
use bookstore_service::domain::errors::{DomainError, FieldError};
use bookstore_service::domain::order::{BookItem, OrderStatus};
use bookstore_service::domain::user::{NewUser, User};
use bookstore_service::{AppState, MemoryBookstore};

fn state() -> AppState<MemoryBookstore> {
    AppState::new(MemoryBookstore::new())
}

fn seed_book(state: &AppState<MemoryBookstore>, name: &str, price: &str, stock: i32) -> Book {
    state
        .books
        .add_book(NewBook {
            name: name.to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity_in_stock: stock,
        })
        .expect("add book failed")
}

fn seed_user(state: &AppState<MemoryBookstore>, name: &str) -> User {
    state
        .users
        .add_user(NewUser {
            name: name.to_string(),
        })
        .expect("add user failed")
}

fn item(book_id: Uuid, quantity: i32) -> BookItem {
    BookItem { book_id, quantity }
}

/// Unwraps the first field error of a validation failure.
fn first_field_error(err: DomainError) -> FieldError {
    match err {
        DomainError::Validation(errors) => errors.first().expect("at least one error").clone(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn stock_of(state: &AppState<MemoryBookstore>, book_id: Uuid) -> i32 {
    state
        .books
        .get_book(book_id)
        .expect("get book failed")
        .expect("book should exist")
        .quantity_in_stock
}

#[test]
fn creating_an_order_reserves_stock_and_totals_it() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");

    let order = state
        .orders
        .create_order(user.id, vec![item(book.id, 2)])
        .expect("create order failed");

    assert_eq!(order.user_id, user.id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_payment, BigDecimal::from(240));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(stock_of(&state, book.id), 3);
}

#[test]
fn totals_cover_every_line_item() {
    let state = state();
    let first = seed_book(&state, "Refactoring", "120", 5);
    let second = seed_book(&state, "Beautiful Code", "9.99", 2);
    let user = seed_user(&state, "Yuri");

    let order = state
        .orders
        .create_order(user.id, vec![item(first.id, 2), item(second.id, 1)])
        .expect("create order failed");

    assert_eq!(
        order.total_payment,
        BigDecimal::from_str("249.99").expect("valid decimal")
    );
    assert_eq!(stock_of(&state, first.id), 3);
    assert_eq!(stock_of(&state, second.id), 1);
}

#[test]
fn line_items_keep_the_price_at_order_time() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");

    let order = state
        .orders
        .create_order(user.id, vec![item(book.id, 1)])
        .expect("create order failed");

    assert_eq!(order.items[0].unit_price, BigDecimal::from(120));
}

#[test]
fn paying_marks_the_order_paid() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");
    let order = state
        .orders
        .create_order(user.id, vec![item(book.id, 2)])
        .expect("create order failed");

    let paid = state.orders.pay_order(order.id).expect("pay failed");
    assert_eq!(paid.status, OrderStatus::Paid);

    let reloaded = state
        .orders
        .get_order(order.id)
        .expect("get order failed")
        .expect("order should exist");
    assert_eq!(reloaded.status, OrderStatus::Paid);
}

#[test]
fn paying_twice_is_refused_with_a_field_error() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");
    let order = state
        .orders
        .create_order(user.id, vec![item(book.id, 2)])
        .expect("create order failed");
    state.orders.pay_order(order.id).expect("first pay failed");

    let error = first_field_error(
        state
            .orders
            .pay_order(order.id)
            .expect_err("second pay must fail"),
    );
    assert_eq!(error.field, "id");
    assert_eq!(error.message, "Order status was already PAID");
    assert_eq!(error.rejected_value, json!(order.id));
}

#[test]
fn paying_an_unknown_order_is_not_found() {
    let state = state();
    let err = state
        .orders
        .pay_order(Uuid::new_v4())
        .expect_err("unknown order must fail");
    assert!(matches!(err, DomainError::OrderNotExist));
}

#[test]
fn overdrawn_quantity_is_refused_and_stock_kept() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");

    let error = first_field_error(
        state
            .orders
            .create_order(user.id, vec![item(book.id, 6)])
            .expect_err("overdraw must fail"),
    );
    assert_eq!(error.field, "quantity");
    assert_eq!(
        error.message,
        format!("Not enough books in stock with id: {}", book.id)
    );
    assert_eq!(error.rejected_value, json!(6));
    assert_eq!(stock_of(&state, book.id), 5);
}

#[test]
fn duplicate_book_ids_are_refused() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");

    let error = first_field_error(
        state
            .orders
            .create_order(user.id, vec![item(book.id, 1), item(book.id, 1)])
            .expect_err("duplicates must fail"),
    );
    assert_eq!(error.field, "books");
    assert_eq!(error.message, "Book id is not unique");
    assert_eq!(stock_of(&state, book.id), 5);
}

#[test]
fn empty_order_is_refused() {
    let state = state();
    let user = seed_user(&state, "Yuri");

    let error = first_field_error(
        state
            .orders
            .create_order(user.id, vec![])
            .expect_err("empty order must fail"),
    );
    assert_eq!(error.field, "books");
    assert_eq!(error.rejected_value, json!([]));
}

#[test]
fn unknown_book_is_refused() {
    let state = state();
    let user = seed_user(&state, "Yuri");
    let ghost = Uuid::new_v4();

    let error = first_field_error(
        state
            .orders
            .create_order(user.id, vec![item(ghost, 1)])
            .expect_err("unknown book must fail"),
    );
    assert_eq!(error.field, "books[].bookId");
    assert_eq!(error.message, "Book doesn't exist");
    assert_eq!(error.rejected_value, json!(ghost));
}

#[test]
fn unknown_user_is_refused_before_any_reservation() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);

    let error = first_field_error(
        state
            .orders
            .create_order(Uuid::new_v4(), vec![item(book.id, 2)])
            .expect_err("unknown user must fail"),
    );
    assert_eq!(error.field, "userId");
    assert_eq!(error.message, "User doesn't exist");
    assert_eq!(stock_of(&state, book.id), 5);
}

// The checks run in a fixed sequence and the first failing one wins:
// item-list shape, then book existence, then stock, then the user.
#[test]
fn earlier_validation_phases_mask_later_ones() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let ghost = Uuid::new_v4();

    // Duplicate ids beat the unknown book and the unknown user.
    let error = first_field_error(
        state
            .orders
            .create_order(
                Uuid::new_v4(),
                vec![item(book.id, 1), item(book.id, 1), item(ghost, 99)],
            )
            .expect_err("must fail"),
    );
    assert_eq!(error.message, "Book id is not unique");

    // An unknown book beats the overdraw and the unknown user.
    let error = first_field_error(
        state
            .orders
            .create_order(Uuid::new_v4(), vec![item(book.id, 99), item(ghost, 1)])
            .expect_err("must fail"),
    );
    assert_eq!(error.field, "books[].bookId");

    // An overdraw beats the unknown user.
    let error = first_field_error(
        state
            .orders
            .create_order(Uuid::new_v4(), vec![item(book.id, 99)])
            .expect_err("must fail"),
    );
    assert_eq!(error.field, "quantity");

    assert_eq!(stock_of(&state, book.id), 5);
}

#[test]
fn cancelling_restores_stock_and_deletes_the_order() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 5);
    let user = seed_user(&state, "Yuri");
    let order = state
        .orders
        .create_order(user.id, vec![item(book.id, 2)])
        .expect("create order failed");
    assert_eq!(stock_of(&state, book.id), 3);

    state.orders.cancel_order(order.id).expect("cancel failed");

    assert_eq!(stock_of(&state, book.id), 5);
    assert!(state
        .orders
        .get_order(order.id)
        .expect("get order failed")
        .is_none());
}

#[test]
fn cancelling_skips_books_no_longer_in_the_catalog() {
    let state = state();
    let kept = seed_book(&state, "Refactoring", "120", 5);
    let doomed = seed_book(&state, "Out of Print", "15", 2);
    let user = seed_user(&state, "Yuri");
    let order = state
        .orders
        .create_order(user.id, vec![item(kept.id, 1), item(doomed.id, 2)])
        .expect("create order failed");

    assert!(state.books.delete_book(doomed.id).expect("delete failed"));

    state.orders.cancel_order(order.id).expect("cancel failed");

    assert_eq!(stock_of(&state, kept.id), 5);
    assert!(state
        .orders
        .get_order(order.id)
        .expect("get order failed")
        .is_none());
}

#[test]
fn cancelling_an_unknown_order_is_not_found() {
    let state = state();
    let err = state
        .orders
        .cancel_order(Uuid::new_v4())
        .expect_err("unknown order must fail");
    assert!(matches!(err, DomainError::OrderNotExist));
}

#[test]
fn orders_by_user_returns_only_their_orders_newest_first() {
    let state = state();
    let book = seed_book(&state, "Refactoring", "120", 50);
    let yuri = seed_user(&state, "Yuri");
    let ivan = seed_user(&state, "Ivan");

    let first = state
        .orders
        .create_order(yuri.id, vec![item(book.id, 1)])
        .expect("create failed");
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = state
        .orders
        .create_order(yuri.id, vec![item(book.id, 2)])
        .expect("create failed");
    state
        .orders
        .create_order(ivan.id, vec![item(book.id, 3)])
        .expect("create failed");

    let orders = state
        .orders
        .get_orders_by_user(yuri.id)
        .expect("list failed");
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn orders_by_unknown_user_is_a_field_error() {
    let state = state();
    let ghost = Uuid::new_v4();

    let error = first_field_error(
        state
            .orders
            .get_orders_by_user(ghost)
            .expect_err("unknown user must fail"),
    );
    assert_eq!(error.field, "userId");
    assert_eq!(error.rejected_value, json!(ghost));
}

#[test]
fn add_book_accumulates_field_errors() {
    let state = state();
    let err = state
        .books
        .add_book(NewBook {
            name: "%Book".to_string(),
            unit_price: BigDecimal::from(-5),
            quantity_in_stock: -1,
        })
        .expect_err("invalid book must fail");

    match err {
        DomainError::Validation(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["name", "price", "quantity"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn add_user_rejects_invalid_names() {
    let state = state();
    let error = first_field_error(
        state
            .users
            .add_user(NewUser {
                name: "...$dd".to_string(),
            })
            .expect_err("invalid user must fail"),
    );
    assert_eq!(error.field, "name");
    assert_eq!(error.message, "User name is not valid");
}
