//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Data access contract for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email. `Ok(None)` when absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists users ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<i64, AppError>;

    /// Partially updates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches `id`,
    /// [`AppError::Conflict`] if the new email is taken.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    /// Deletes a user. Returns `Ok(false)` when absent.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
