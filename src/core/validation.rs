//! Credential validation for the register, create, login and update flows.
//!
//! Every failing field is reported, not just the first one. The validator only
//! reads from the store (for email uniqueness) and never writes.

use crate::core::errors::{AccountsError, FieldError};
use crate::infrastructure::storage::Storage;

const NAME_MAX_LENGTH: usize = 255;
const EMAIL_MAX_LENGTH: usize = 255;

/// Raw fields as submitted by a client.
#[derive(Clone, Debug, Default)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Public self-registration; requires a matching password confirmation.
    Register,
    /// Account creation by an authenticated caller.
    Create,
    Login,
    /// Changing an existing user; its own email does not count as taken.
    Update { user_id: u64 },
}

/// Normalized fields: trimmed name, trimmed lower-cased email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedFields {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

pub struct CredentialValidator<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> CredentialValidator<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        CredentialValidator { storage }
    }

    pub async fn validate(&self, input: &UserInput, mode: ValidationMode) -> Result<ValidatedFields, AccountsError> {
        let mut errors = Vec::new();

        let name = match mode {
            ValidationMode::Login => None,
            _ => validate_name(input.name.as_deref(), &mut errors),
        };

        let email = validate_email(input.email.as_deref(), &mut errors);
        if let Some(ref email) = email {
            if mode != ValidationMode::Login && self.email_taken(email, mode).await? {
                errors.push(FieldError::new("email", "The email has already been taken."));
            }
        }

        let password = match input.password.as_deref() {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => {
                errors.push(FieldError::new("password", "The password field is required."));
                None
            }
        };

        if let Some(ref password) = password {
            let confirmation = input.password_confirmation.as_deref();
            let mismatch = match mode {
                ValidationMode::Register => confirmation != Some(password.as_str()),
                ValidationMode::Update { .. } => confirmation.is_some_and(|c| c != password),
                _ => false,
            };
            if mismatch {
                errors.push(FieldError::new("password", "The password confirmation does not match."));
            }
        }

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(ValidatedFields { name, email, password }),
            _ => Err(AccountsError::Validation(errors)),
        }
    }

    async fn email_taken(&self, email: &str, mode: ValidationMode) -> Result<bool, AccountsError> {
        let existing = self.storage.get_user_by_email(email).await?;
        Ok(match (existing, mode) {
            (Some(user), ValidationMode::Update { user_id }) => user.id != user_id,
            (Some(_), _) => true,
            (None, _) => false,
        })
    }
}

fn validate_name(name: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.push(FieldError::new("name", "The name field is required."));
        return None;
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        errors.push(FieldError::new(
            "name",
            format!("The name may not be greater than {} characters.", NAME_MAX_LENGTH),
        ));
        return None;
    }
    if name.chars().any(char::is_control) {
        errors.push(FieldError::new("name", "The name contains invalid characters."));
        return None;
    }
    Some(name.to_string())
}

fn validate_email(email: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let email = email.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        errors.push(FieldError::new("email", "The email field is required."));
        return None;
    }
    if email.len() > EMAIL_MAX_LENGTH || !is_valid_email(email) {
        errors.push(FieldError::new("email", "The email must be a valid email address."));
        return None;
    }
    Some(email.to_lowercase())
}

/// `local@domain.tld` with no whitespace, a single `@` and non-empty dot-separated domain labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}
