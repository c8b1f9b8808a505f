use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_JWT_SECRET: &str = "secret";
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;
pub const DEFAULT_AUDIT_LOG_CAPACITY: usize = 10_000;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub audit_log_capacity: usize,
    /// Problems found while loading, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("audit_log_capacity", &self.audit_log_capacity)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warnings.push("JWT_SECRET is not set; using the built-in default, tokens can be forged".to_string());
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost = match lookup("BCRYPT_COST").map(|v| v.parse::<u32>()) {
            None => bcrypt::DEFAULT_COST,
            Some(Ok(cost)) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) => cost,
            Some(Ok(cost)) => {
                let clamped = cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);
                warnings.push(format!(
                    "BCRYPT_COST {} is outside {}..={}; using {}",
                    cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST, clamped
                ));
                clamped
            }
            Some(Err(_)) => {
                warnings.push(format!("BCRYPT_COST is not a number; using {}", bcrypt::DEFAULT_COST));
                bcrypt::DEFAULT_COST
            }
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            jwt_secret,
            token_ttl_secs: lookup("TOKEN_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            bcrypt_cost,
            audit_log_capacity: lookup("AUDIT_LOG_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_AUDIT_LOG_CAPACITY),
            warnings,
        }
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_secs: self.token_ttl_secs,
            bcrypt_cost: self.bcrypt_cost,
        }
    }
}

/// Credential-issuance settings handed to the account service.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
