use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;

/// Signed session claims. `sub` is a user id, or a freelancer id when
/// `role` is `freelancer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl,
        }
    }

    pub fn issue(&self, subject: Uuid, email: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign session token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", Duration::hours(1))
    }

    #[test]
    fn test_issued_token_verifies() {
        let keys = keys();
        let id = Uuid::new_v4();
        let token = keys.issue(id, "a@example.com", Role::Admin).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys()
            .issue(Uuid::new_v4(), "a@example.com", Role::User)
            .unwrap();
        let other = SessionKeys::new("another-secret", Duration::hours(1));
        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // beyond the default 60s leeway
        let keys = SessionKeys::new("test-secret", Duration::minutes(-5));
        let token = keys
            .issue(Uuid::new_v4(), "a@example.com", Role::User)
            .unwrap();
        assert!(matches!(keys.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(keys().verify("not.a.token").is_err());
    }
}
