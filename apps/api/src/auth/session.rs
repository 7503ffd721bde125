use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::token::SessionKeys;
use crate::errors::AppError;
use crate::models::user::Role;

/// Authenticated caller, extracted from `Authorization: Bearer <token>`.
///
/// Handlers that need a signed-in caller take this as an argument; there is
/// no ambient session anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub subject: Uuid,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Clients and admins; freelancer sessions are refused.
    pub fn require_client(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin | Role::User => Ok(()),
            Role::Freelancer => Err(AppError::Forbidden),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected Bearer token".into()))?;

        let claims = keys.verify(token.trim())?;
        Ok(Session {
            subject: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Duration;

    async fn extract(header: Option<String>, keys: &SessionKeys) -> Result<Session, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Session::from_request_parts(&mut parts, keys).await
    }

    #[tokio::test]
    async fn test_valid_bearer_token() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        let id = Uuid::new_v4();
        let token = keys.issue(id, "u@example.com", Role::User).unwrap();

        let session = extract(Some(format!("Bearer {token}")), &keys).await.unwrap();
        assert_eq!(session.subject, id);
        assert_eq!(session.role, Role::User);
        assert!(session.require_client().is_ok());
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        assert!(matches!(
            extract(None, &keys).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        assert!(matches!(
            extract(Some("Basic abc".to_string()), &keys).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_freelancer_is_not_a_client() {
        let session = Session {
            subject: Uuid::new_v4(),
            email: "f@example.com".to_string(),
            role: Role::Freelancer,
        };
        assert!(matches!(session.require_client(), Err(AppError::Forbidden)));
        assert!(!session.is_admin());
    }
}
