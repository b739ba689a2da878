//! Bearer-token extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use curio_core::error::CoreError;
use curio_core::types::DbId;

use crate::auth::jwt::{verify_token, Role};
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid `Authorization: Bearer` token. Handlers that
/// take it answer 401 to anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = verify_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// An [`AuthUser`] holding [`Role::Service`]. Anyone else gets 403.
///
/// Guards the queue administration routes, which only the match worker and
/// operators holding a service token may use.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCaller(pub AuthUser);

impl AuthUser {
    /// `Forbidden` unless the caller holds a service token.
    pub fn require_service(self) -> Result<Self, CoreError> {
        match self.role {
            Role::Service => Ok(self),
            Role::User => Err(CoreError::Forbidden(
                "This endpoint requires a service token".into(),
            )),
        }
    }
}

impl FromRequestParts<AppState> for ServiceCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;
        Ok(ServiceCaller(caller.require_service()?))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(CoreError::Unauthorized(msg)) if msg.contains("Missing")
        );
        assert_matches!(bearer_token(&headers("Basic abc")), Err(CoreError::Unauthorized(_)));
        assert_matches!(bearer_token(&headers("Bearer ")), Err(CoreError::Unauthorized(_)));
    }

    #[test]
    fn only_service_role_passes_service_check() {
        let service = AuthUser {
            user_id: 9,
            role: Role::Service,
        };
        assert_eq!(service.require_service().unwrap().user_id, 9);

        let user = AuthUser {
            user_id: 1,
            role: Role::User,
        };
        assert_matches!(user.require_service(), Err(CoreError::Forbidden(_)));
    }
}
