use crate::core::errors::AccountsError;
use crate::core::models::user::{NewUser, User, UserChanges};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts a user, assigning its id and timestamps. Fails with
    /// `EmailAlreadyRegistered` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AccountsError>;
    async fn get_user(&self, user_id: u64) -> Result<Option<User>, AccountsError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AccountsError>;
    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, AccountsError>;
    /// Applies `changes` to an existing user. `Ok(None)` when the id is unknown.
    async fn update_user(&self, user_id: u64, changes: UserChanges) -> Result<Option<User>, AccountsError>;
    /// Removes a user, returning the removed record. `Ok(None)` when the id is unknown.
    async fn delete_user(&self, user_id: u64) -> Result<Option<User>, AccountsError>;
}

pub mod in_memory;
