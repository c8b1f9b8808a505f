use crate::core::errors::AccountsError;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Salted one-way password hashing backed by bcrypt.
///
/// Comparison happens inside `bcrypt::verify`, which is constant-time. Both
/// operations run on tokio's blocking pool.
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, AccountsError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| AccountsError::InternalServerError(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AccountsError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    pub async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, AccountsError> {
        let plaintext = plaintext.to_string();
        let hashed = hashed.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hashed))
            .await
            .map_err(|e| AccountsError::InternalServerError(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AccountsError::InternalServerError(format!("Password verification error: {}", e)))
    }

    /// Spends the same bcrypt work as `verify` when there is no stored hash to
    /// check against. Always `Ok(false)` on success.
    pub async fn verify_dummy(&self, plaintext: &str) -> Result<bool, AccountsError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;
        let dummy_hash = Arc::clone(&self.dummy_hash);
        tokio::task::spawn_blocking(move || {
            let hashed = dummy_hash.get_or_try_init(|| bcrypt::hash("dummy-password-never-matches", cost))?;
            bcrypt::verify(plaintext, hashed).map(|_| false)
        })
        .await
        .map_err(|e| AccountsError::InternalServerError(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AccountsError::InternalServerError(format!("Password verification error: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
