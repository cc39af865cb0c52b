use bigdecimal::BigDecimal;
use serde_json::json;
use uuid::Uuid;

use super::errors::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity_in_stock: i32,
}

/// Payload for adding a book to the catalog; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity_in_stock: i32,
}

/// A catalog name starts with a letter or digit; the rest may add
/// whitespace, commas and periods ("Effective Java, 3rd Edition").
pub fn is_valid_book_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == ',' || c == '.')
}

/// Field-level checks for a new catalog entry. An empty result means
/// the book is acceptable.
pub fn validate(new_book: &NewBook) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if new_book.name.trim().is_empty() {
        errors.add("name", "Name can't be blank", json!(new_book.name));
    } else if !is_valid_book_name(&new_book.name) {
        errors.add("name", "Book name is not valid", json!(new_book.name));
    }
    if new_book.unit_price < BigDecimal::from(0) {
        errors.add(
            "price",
            "Price can't be less than 0",
            json!(new_book.unit_price.to_string()),
        );
    }
    if new_book.quantity_in_stock < 0 {
        errors.add(
            "quantity",
            "Quantity can't be less than 0",
            json!(new_book.quantity_in_stock),
        );
    }
    errors
}
