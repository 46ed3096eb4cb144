use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiResponseBody;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated identity in request extensions.
///
/// Present only after [`authenticate`] succeeded; protected handlers can
/// rely on it unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Failures of the bearer-token gate and the ownership guard.
///
/// All variants render as 401; the split between "not authenticated" and
/// "not authorized" is intentionally not surfaced to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header. Expected: Bearer <token>")]
    Missing,

    #[error("Invalid token")]
    Invalid,

    #[error("Token is expired")]
    Expired,

    #[error("Unauthorized")]
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponseBody::new_error(
                StatusCode::UNAUTHORIZED,
                self.to_string(),
            )),
        )
            .into_response()
    }
}

/// Middleware gating every protected route.
///
/// Extracts and validates the bearer token, then attaches
/// [`AuthenticatedUser`] to the request. Any failure short-circuits with
/// 401 before the downstream handler (and any of its database access) runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        match e {
            auth::JwtError::TokenExpired => AuthError::Expired,
            _ => AuthError::Invalid,
        }
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Failed to parse user ID from token subject: {}", e);
        AuthError::Invalid
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Ownership guard for mutating operations on a user resource.
///
/// The path-referenced id must equal the authenticated identity exactly.
/// No roles, no hierarchy. Read operations deliberately skip this check.
pub fn require_owner(
    requested: &UserId,
    authenticated: &AuthenticatedUser,
) -> Result<(), AuthError> {
    if *requested == authenticated.user_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

fn extract_token_from_header(req: &Request) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::Missing)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::Missing)?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Missing)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn test_require_owner_accepts_matching_id() {
        let id = UserId::new();
        let authenticated = AuthenticatedUser { user_id: id };

        assert_eq!(require_owner(&id, &authenticated), Ok(()));
    }

    #[test]
    fn test_require_owner_rejects_other_id() {
        let authenticated = AuthenticatedUser {
            user_id: UserId::new(),
        };

        assert_eq!(
            require_owner(&UserId::new(), &authenticated),
            Err(AuthError::Forbidden)
        );
    }

    fn request_with_authorization(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/users/someone");
        if let Some(value) = value {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_success() {
        let req = request_with_authorization(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_missing_header() {
        let req = request_with_authorization(None);
        assert_eq!(extract_token_from_header(&req), Err(AuthError::Missing));
    }

    #[test]
    fn test_extract_token_wrong_scheme() {
        let req = request_with_authorization(Some("Basic abc"));
        assert_eq!(extract_token_from_header(&req), Err(AuthError::Missing));
    }
}
