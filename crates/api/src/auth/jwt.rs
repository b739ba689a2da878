//! HS256 bearer tokens.
//!
//! End users and the match worker present the same kind of token. The
//! worker's token names a service account and carries [`Role::Service`].

use curio_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    /// Background callers such as the match job worker.
    Service,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Service => "service",
        }
    }
}

/// Token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the user or service account.
    pub sub: DbId,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// | Env Var                  | Default  |
    /// |--------------------------|----------|
    /// | `JWT_SECRET`             | required |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `15`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the expiry does not
    /// parse.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn validation() -> Validation {
        Validation::new(Algorithm::HS256)
    }
}

/// Sign a token for `subject` valid for the configured lifetime.
pub fn issue_token(
    subject: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject,
        role,
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry and return the payload.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn service_token_round_trips() {
        let config = config("worker-signing-secret");
        let token = issue_token(42, Role::Service, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Service);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative lifetime puts `exp` well past the default leeway.
        let expired = JwtConfig {
            access_token_expiry_mins: -10,
            ..config("worker-signing-secret")
        };
        let token = issue_token(1, Role::User, &expired).unwrap();

        assert!(verify_token(&token, &config("worker-signing-secret")).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = issue_token(1, Role::User, &config("secret-alpha")).unwrap();
        assert!(verify_token(&token, &config("secret-bravo")).is_err());
    }

    #[test]
    fn role_is_encoded_as_a_lowercase_string() {
        let json = serde_json::to_value(Role::Service).unwrap();
        assert_eq!(json, Role::Service.as_str());
    }
}
