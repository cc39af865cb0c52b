use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle of an order. There are exactly two states; cancellation
/// deletes the order instead of parking it in a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            _ => None,
        }
    }
}

/// One requested position of an incoming order: which book, how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookItem {
    pub book_id: Uuid,
    pub quantity: i32,
}

/// A persisted order position. Keeps the unit price the book had when
/// the order was placed, so later catalog edits don't change totals.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_payment: BigDecimal,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

/// Payload for persisting a freshly validated order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub total_payment: BigDecimal,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
}

/// Sum of `unit_price * quantity` over the line items.
pub fn order_total(items: &[LineItem]) -> BigDecimal {
    items.iter().fold(BigDecimal::from(0), |total, item| {
        total + &item.unit_price * BigDecimal::from(item.quantity)
    })
}
