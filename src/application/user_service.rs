use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{Bookstore, UserDirectory};
use crate::domain::user::{self, NewUser, User};

pub struct UserService<S> {
    store: S,
}

impl<S: Bookstore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let errors = user::validate(&new_user);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        self.store.transaction(|tx| {
            let user = tx.insert_user(new_user)?;
            log::info!("user {} registered: {}", user.id, user.name);
            Ok(user)
        })
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.store.transaction(|tx| Ok(tx.find_user(id)?))
    }

    pub fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.store.transaction(|tx| Ok(tx.all_users()?))
    }

    pub fn delete_user(&self, id: Uuid) -> Result<bool, DomainError> {
        self.store.transaction(|tx| Ok(tx.delete_user(id)?))
    }
}
