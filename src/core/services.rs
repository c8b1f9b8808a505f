use crate::auth::jwt::{Claims, JwtService};
use crate::auth::password::PasswordHasher;
use crate::config::AuthSettings;
use crate::core::constants::{USER_CREATED, USER_DELETED, USER_LOGGED_IN, USER_REGISTERED, USER_UPDATED};
use crate::core::errors::AccountsError;
use crate::core::models::{
    audit::AppLog,
    user::{NewUser, User, UserChanges},
};
use crate::core::validation::{CredentialValidator, UserInput, ValidationMode};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use serde_json::json;
use tracing::{info, warn};

/// A freshly issued bearer token together with the user it is bound to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub user: User,
}

pub struct AccountsService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    jwt_service: JwtService,
    hasher: PasswordHasher,
}

impl<L: LoggingService, S: Storage> AccountsService<L, S> {
    pub fn new(storage: S, logging: L, settings: AuthSettings) -> Self {
        AccountsService {
            storage,
            logging,
            jwt_service: JwtService::new(settings.jwt_secret, settings.token_ttl_secs),
            hasher: PasswordHasher::new(settings.bcrypt_cost),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AccountsError> {
        self.jwt_service.validate_token(token)
    }

    /// Resolves a bearer token to the live user it was issued for.
    pub async fn authenticate_token(&self, token: &str) -> Result<User, AccountsError> {
        let claims = self.validate_token(token)?;
        let user_id = claims.user_id()?;
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| AccountsError::Unauthenticated(format!("User {} no longer exists", user_id)))
    }

    fn validator(&self) -> CredentialValidator<'_, S> {
        CredentialValidator::new(&self.storage)
    }

    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<u64>,
    ) -> Result<(), AccountsError> {
        let user_id = user_id.map(|id| id.to_string());
        self.logging.log_action(action, details, user_id.as_deref()).await
    }

    pub async fn register(&self, input: UserInput) -> Result<IssuedToken, AccountsError> {
        let fields = self.validator().validate(&input, ValidationMode::Register).await?;
        let password_hash = self.hasher.hash(&fields.password).await?;
        let user = self
            .storage
            .create_user(NewUser {
                name: fields.name.unwrap_or_default(),
                email: fields.email,
                password_hash,
            })
            .await?;
        let token = self.jwt_service.generate_token(user.id)?;

        info!(user_id = user.id, "user registered");
        self.log_action(
            USER_REGISTERED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(user.id),
        )
        .await?;

        Ok(IssuedToken { token, user })
    }

    pub async fn login(&self, input: UserInput) -> Result<IssuedToken, AccountsError> {
        let fields = self.validator().validate(&input, ValidationMode::Login).await?;
        let Some(user) = self.storage.get_user_by_email(&fields.email).await? else {
            // Same bcrypt cost as a real check, so unknown emails are not faster.
            self.hasher.verify_dummy(&fields.password).await?;
            warn!("login attempt for unknown email");
            return Err(AccountsError::InvalidCredentials);
        };

        if !self.hasher.verify(&fields.password, &user.password_hash).await? {
            warn!(user_id = user.id, "login attempt with wrong password");
            return Err(AccountsError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_token(user.id)?;
        info!(user_id = user.id, "user logged in");
        self.log_action(USER_LOGGED_IN, json!({ "user_id": user.id }), Some(user.id))
            .await?;

        Ok(IssuedToken { token, user })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AccountsError> {
        self.storage.list_users().await
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, AccountsError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| AccountsError::UserNotFound(user_id.to_string()))
    }

    pub async fn create_user(&self, input: UserInput, created_by: &User) -> Result<User, AccountsError> {
        let fields = self.validator().validate(&input, ValidationMode::Create).await?;
        let password_hash = self.hasher.hash(&fields.password).await?;
        let user = self
            .storage
            .create_user(NewUser {
                name: fields.name.unwrap_or_default(),
                email: fields.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, created_by = created_by.id, "user created");
        self.log_action(
            USER_CREATED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(created_by.id),
        )
        .await?;

        Ok(user)
    }

    pub async fn update_user(&self, user_id: u64, input: UserInput, updated_by: &User) -> Result<User, AccountsError> {
        // Unknown ids are reported before any field validation.
        self.get_user(user_id).await?;

        let fields = self
            .validator()
            .validate(&input, ValidationMode::Update { user_id })
            .await?;
        let password_hash = self.hasher.hash(&fields.password).await?;
        let user = self
            .storage
            .update_user(
                user_id,
                UserChanges {
                    name: fields.name.unwrap_or_default(),
                    email: fields.email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AccountsError::UserNotFound(user_id.to_string()))?;

        info!(user_id, updated_by = updated_by.id, "user updated");
        self.log_action(
            USER_UPDATED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(updated_by.id),
        )
        .await?;

        Ok(user)
    }

    pub async fn delete_user(&self, user_id: u64, deleted_by: &User) -> Result<User, AccountsError> {
        let user = self
            .storage
            .delete_user(user_id)
            .await?
            .ok_or_else(|| AccountsError::UserNotFound(user_id.to_string()))?;

        info!(user_id, deleted_by = deleted_by.id, "user deleted");
        self.log_action(USER_DELETED, json!({ "user_id": user.id }), Some(deleted_by.id))
            .await?;

        Ok(user)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, AccountsError> {
        self.logging.get_logs().await
    }
}
