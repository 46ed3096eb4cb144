use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    // An unknown email and a wrong password are indistinguishable to the
    // client.
    let user = state
        .user_service
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })?;

    let claims = auth::Claims::for_user(user.id, state.jwt_expiration_hours);

    // Argon2 verification is CPU-heavy; run it off the async workers.
    let authenticator = Arc::clone(&state.authenticator);
    let stored_hash = user.password_hash.clone();
    let password = body.password;
    let result = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&password, &stored_hash, &claims)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Verification task failed: {}", e)))?
    .map_err(|e| match e {
        auth::AuthenticationError::InvalidCredentials => {
            ApiError::Unauthorized("Invalid credentials".to_string())
        }
        auth::AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Password verification failed: {}", err))
        }
        auth::AuthenticationError::JwtError(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            user: (&user).into(),
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}
