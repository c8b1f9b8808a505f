use crate::core::errors::AccountsError;
use crate::core::models::user::NewUser;
use crate::core::validation::{CredentialValidator, UserInput, ValidationMode, is_valid_email};
use crate::infrastructure::storage::{Storage, in_memory::InMemoryStorage};
use crate::tests::registration;

async fn storage_with(email: &str) -> (InMemoryStorage, u64) {
    let storage = InMemoryStorage::new();
    let user = storage
        .create_user(NewUser {
            name: "Existing".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();
    (storage, user.id)
}

fn failed_fields(result: Result<impl std::fmt::Debug, AccountsError>) -> Vec<(String, String)> {
    match result {
        Err(AccountsError::Validation(errors)) => errors.into_iter().map(|e| (e.field, e.message)).collect(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_email_syntax() {
    for valid in ["a@x.com", "first.last+tag@sub.example.org", "A@X.CO"] {
        assert!(is_valid_email(valid), "{valid} should be valid");
    }
    for invalid in ["", "plain", "@x.com", "a@", "a@x", "a@@x.com", "a b@x.com", "a@x..com", "a@-x.com"] {
        assert!(!is_valid_email(invalid), "{invalid} should be invalid");
    }
}

#[tokio::test]
async fn test_register_normalizes_fields() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);
    let fields = validator
        .validate(&registration("  Alice ", " Alice@Example.COM ", "secret"), ValidationMode::Register)
        .await
        .unwrap();

    assert_eq!(fields.name.as_deref(), Some("Alice"));
    assert_eq!(fields.email, "alice@example.com");
    assert_eq!(fields.password, "secret");
}

#[tokio::test]
async fn test_register_reports_every_missing_field() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);
    let fields = failed_fields(validator.validate(&UserInput::default(), ValidationMode::Register).await);

    let names: Vec<_> = fields.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(names, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn test_register_requires_matching_confirmation() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);

    let mut input = registration("A", "a@x.com", "secret");
    input.password_confirmation = Some("different".to_string());
    let fields = failed_fields(validator.validate(&input, ValidationMode::Register).await);
    assert_eq!(
        fields,
        vec![(
            "password".to_string(),
            "The password confirmation does not match.".to_string()
        )]
    );

    input.password_confirmation = None;
    assert!(validator.validate(&input, ValidationMode::Register).await.is_err());

    // Admin creation has no confirmation field.
    assert!(validator.validate(&input, ValidationMode::Create).await.is_ok());
}

#[tokio::test]
async fn test_uniqueness_depends_on_mode() {
    let (storage, existing_id) = storage_with("taken@x.com").await;
    let validator = CredentialValidator::new(&storage);
    let input = registration("A", "TAKEN@x.com", "secret");

    let fields = failed_fields(validator.validate(&input, ValidationMode::Register).await);
    assert_eq!(
        fields,
        vec![("email".to_string(), "The email has already been taken.".to_string())]
    );
    assert!(validator.validate(&input, ValidationMode::Create).await.is_err());
    assert!(validator.validate(&input, ValidationMode::Login).await.is_ok());
    assert!(
        validator
            .validate(&input, ValidationMode::Update { user_id: existing_id })
            .await
            .is_ok()
    );
    assert!(
        validator
            .validate(&input, ValidationMode::Update { user_id: existing_id + 1 })
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_login_ignores_name() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);
    let input = UserInput {
        email: Some("a@x.com".to_string()),
        password: Some("secret".to_string()),
        ..UserInput::default()
    };
    let fields = validator.validate(&input, ValidationMode::Login).await.unwrap();
    assert_eq!(fields.name, None);
}

#[tokio::test]
async fn test_update_checks_confirmation_only_when_given() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);
    let mode = ValidationMode::Update { user_id: 1 };

    let mut input = registration("A", "a@x.com", "secret");
    input.password_confirmation = None;
    assert!(validator.validate(&input, mode).await.is_ok());

    input.password_confirmation = Some("nope".to_string());
    assert!(validator.validate(&input, mode).await.is_err());
}

#[tokio::test]
async fn test_name_rules() {
    let storage = InMemoryStorage::new();
    let validator = CredentialValidator::new(&storage);

    let too_long = "n".repeat(256);
    let fields = failed_fields(
        validator
            .validate(&registration(&too_long, "a@x.com", "secret"), ValidationMode::Create)
            .await,
    );
    assert_eq!(fields[0].0, "name");

    let fields = failed_fields(
        validator
            .validate(&registration("bad\u{7}name", "a@x.com", "secret"), ValidationMode::Create)
            .await,
    );
    assert_eq!(fields[0].0, "name");

    let fields = failed_fields(
        validator
            .validate(&registration("   ", "a@x.com", "secret"), ValidationMode::Create)
            .await,
    );
    assert_eq!(fields[0].1, "The name field is required.");
}
