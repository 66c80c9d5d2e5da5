//! User service: normalization and the email uniqueness rule on top of a
//! [`RecordStore`].

use std::sync::Arc;

use crate::db::RecordStore;
use crate::error::ServiceError;
use crate::models::{User, UserId};

/// Trim surrounding whitespace from a name
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// Trim and lowercase an email; every stored email goes through this
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn find_user(&self, id: UserId) -> Result<User, ServiceError> {
        self.store.find(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Register a new user
    ///
    /// The pre-check only produces the early answer; the store's unique
    /// index decides when two registrations race.
    pub async fn register_user(&self, name: &str, email: &str) -> Result<User, ServiceError> {
        let name = normalize_name(name);
        let email = normalize_email(email);

        if self.store.find_by_email(&email).await?.is_some() {
            tracing::info!("Registration refused: email already taken");
            return Err(ServiceError::EmailTaken);
        }

        let id = self.store.create(&name, &email).await?;

        Ok(User { id, name, email })
    }

    /// Update name and email of an existing user
    ///
    /// Resubmitting the stored email skips the uniqueness check.
    pub async fn edit_user(
        &self,
        id: UserId,
        name: &str,
        email: &str,
    ) -> Result<User, ServiceError> {
        let name = normalize_name(name);
        let email = normalize_email(email);

        let current = self.store.find(id).await?.ok_or(ServiceError::NotFound)?;

        if current.email != email {
            let owner = self.store.find_by_email(&email).await?;
            if owner.is_some_and(|owner| owner.id != id) {
                tracing::info!("Edit of user {} refused: email already taken", id);
                return Err(ServiceError::EmailTaken);
            }
        }

        self.store.update(id, &name, &email).await?;

        Ok(User { id, name, email })
    }

    pub async fn remove_user(&self, id: UserId) -> Result<(), ServiceError> {
        self.store.delete(id).await.map_err(ServiceError::Storage)
    }
}
