//! User account service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for registering and managing storefront users.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new user.
    ///
    /// Checks the email first for a friendly conflict; the unique index
    /// remains the authoritative guard against races.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is taken.
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, AppError> {
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict(
                "A user with this email already exists",
                json!({ "email": new_user.email }),
            ));
        }

        self.users.create(new_user).await
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Lists a page of users together with the total count.
    pub async fn list_users(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), AppError> {
        let users = self.users.list(offset, limit).await?;
        let total = self.users.count().await?;
        Ok((users, total))
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty patch,
    /// [`AppError::NotFound`] when the id does not exist,
    /// [`AppError::Conflict`] when the new email is taken.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Update requires at least one field",
                json!({}),
            ));
        }

        self.users.update(id, patch).await
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id does not exist.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }
        Ok(())
    }
}
