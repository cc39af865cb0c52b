use serde_json::json;
use uuid::Uuid;

use super::errors::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
}

/// User names start with a letter; the rest may add digits,
/// underscores, whitespace and periods ("Petr.Ivanov").
pub fn is_valid_user_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || c == '.')
}

pub fn validate(new_user: &NewUser) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_valid_user_name(&new_user.name) {
        errors.add("name", "User name is not valid", json!(new_user.name));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["Yuri", "Ivan", "Petr.Ivanov", "Anna Maria", "bob_42"] {
            assert!(is_valid_user_name(name), "expected valid: {name}");
        }
    }

    #[test]
    fn rejects_names_not_starting_with_letter() {
        for name in ["...$dd", "9lives", "_bob", "", " anna"] {
            assert!(!is_valid_user_name(name), "expected invalid: {name}");
        }
    }

    #[test]
    fn invalid_name_becomes_field_error() {
        let errors = validate(&NewUser {
            name: "...$dd".to_string(),
        });
        let first = errors.first().expect("one error");
        assert_eq!(first.field, "name");
        assert_eq!(first.message, "User name is not valid");
    }
}
