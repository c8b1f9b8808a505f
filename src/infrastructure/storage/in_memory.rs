use crate::core::errors::AccountsError;
use crate::core::models::user::{NewUser, User, UserChanges};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

// Lock order is always users_by_email, then users.
#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<BTreeMap<u64, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, u64>>>,
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: NewUser) -> Result<User, AccountsError> {
        let mut users_by_email = self.users_by_email.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(AccountsError::EmailAlreadyRegistered(user.email));
        }
        let mut users = self.users.write().await;
        let mut next_id = self.next_id.write().await;
        let id = *next_id;
        *next_id += 1;

        let now = Utc::now();
        let stored = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users_by_email.insert(stored.email.clone(), id);
        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, user_id: u64) -> Result<Option<User>, AccountsError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AccountsError> {
        let users_by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(users_by_email.get(email).and_then(|id| users.get(id).cloned()))
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountsError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn update_user(&self, user_id: u64, changes: UserChanges) -> Result<Option<User>, AccountsError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        if changes.email != user.email {
            if users_by_email.contains_key(&changes.email) {
                return Err(AccountsError::EmailAlreadyRegistered(changes.email));
            }
            users_by_email.remove(&user.email);
            users_by_email.insert(changes.email.clone(), user_id);
        }

        user.name = changes.name;
        user.email = changes.email;
        user.password_hash = changes.password_hash;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, user_id: u64) -> Result<Option<User>, AccountsError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        let removed = users.remove(&user_id);
        if let Some(ref user) = removed {
            users_by_email.remove(&user.email);
        }
        Ok(removed)
    }
}
