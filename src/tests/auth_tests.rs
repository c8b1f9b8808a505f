use crate::auth::jwt::JwtService;
use crate::auth::password::PasswordHasher;
use crate::core::errors::AccountsError;

#[tokio::test]
async fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new(4);
    let hashed = hasher.hash("secret").await.unwrap();

    assert_ne!(hashed, "secret");
    assert!(hasher.verify("secret", &hashed).await.unwrap());
    assert!(!hasher.verify("Secret", &hashed).await.unwrap());

    // Salted: the same plaintext never hashes to the same string twice.
    assert_ne!(hasher.hash("secret").await.unwrap(), hashed);
}

#[tokio::test]
async fn test_verify_against_malformed_hash_is_internal_error() {
    let hasher = PasswordHasher::new(4);
    let result = hasher.verify("secret", "not-a-bcrypt-hash").await;
    assert!(matches!(result, Err(AccountsError::InternalServerError(_))));
}

#[tokio::test]
async fn test_dummy_verify_never_matches() {
    let hasher = PasswordHasher::new(4);
    assert!(!hasher.verify_dummy("secret").await.unwrap());
    // Even the dummy's own plaintext reports no match.
    assert!(!hasher.verify_dummy("dummy-password-never-matches").await.unwrap());
    assert!(!hasher.verify_dummy("").await.unwrap());
}

#[test]
fn test_token_round_trip_carries_user_id() {
    let jwt = JwtService::new("secret".to_string(), 3600);
    let token = jwt.generate_token(42).unwrap();
    let claims = jwt.validate_token(&token).unwrap();

    assert_eq!(claims.sub, "42");
    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_tokens_have_distinct_ids() {
    let jwt = JwtService::new("secret".to_string(), 3600);
    let first = jwt.validate_token(&jwt.generate_token(1).unwrap()).unwrap();
    let second = jwt.validate_token(&jwt.generate_token(1).unwrap()).unwrap();
    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let issuer = JwtService::new("one".to_string(), 3600);
    let verifier = JwtService::new("two".to_string(), 3600);
    let token = issuer.generate_token(1).unwrap();

    assert!(matches!(
        verifier.validate_token(&token),
        Err(AccountsError::Unauthenticated(_))
    ));
    assert!(matches!(
        verifier.validate_token("garbage"),
        Err(AccountsError::Unauthenticated(_))
    ));
}

#[test]
fn test_expired_token_is_rejected() {
    // Default validation allows 60s of leeway, so the expiry must be well in the past.
    let jwt = JwtService::new("secret".to_string(), 0);
    let claims = crate::auth::jwt::Claims {
        sub: "1".to_string(),
        jti: "fixed".to_string(),
        iat: 1_000,
        exp: 1_000,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"secret"),
    )
    .unwrap();

    assert!(matches!(jwt.validate_token(&token), Err(AccountsError::Unauthenticated(_))));
}
