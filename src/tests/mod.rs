mod auth_tests;
mod validation_tests;

use crate::config::AuthSettings;
use crate::core::services::AccountsService;
use crate::core::validation::UserInput;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

// bcrypt's minimum cost keeps the suite fast.
pub fn test_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-secret".to_string(),
        token_ttl_secs: 3600,
        bcrypt_cost: 4,
    }
}

pub fn create_test_service() -> AccountsService<InMemoryLogging, InMemoryStorage> {
    AccountsService::new(InMemoryStorage::new(), InMemoryLogging::new(), test_settings())
}

pub fn registration(name: &str, email: &str, password: &str) -> UserInput {
    UserInput {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        password_confirmation: Some(password.to_string()),
    }
}

pub fn credentials(email: &str, password: &str) -> UserInput {
    UserInput {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        ..UserInput::default()
    }
}
