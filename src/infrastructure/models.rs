use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::book::Book;
use crate::domain::errors::StoreError;
use crate::domain::order::{LineItem, Order, OrderStatus};
use crate::domain::user::User;
use crate::schema::{books, order_items, orders, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookRow {
    pub id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity_in_stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = books)]
pub struct NewBookRow {
    pub id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity_in_stock: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_payment: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_payment: BigDecimal,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            name: row.name,
            unit_price: row.unit_price,
            quantity_in_stock: row.quantity_in_stock,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
        }
    }
}

/// Assembles a domain order from its rows. An unknown status string in
/// the database is a corruption, not client input, so it surfaces as a
/// store error.
pub fn order_from_rows(row: OrderRow, item_rows: Vec<OrderItemRow>) -> Result<Order, StoreError> {
    let status = OrderStatus::parse(&row.status).ok_or_else(|| {
        StoreError::Database(format!("unknown order status '{}' for {}", row.status, row.id))
    })?;
    Ok(Order {
        id: row.id,
        user_id: row.user_id,
        total_payment: row.total_payment,
        status,
        items: item_rows
            .into_iter()
            .map(|item| LineItem {
                book_id: item.book_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
        created_at: row.created_at,
    })
}
