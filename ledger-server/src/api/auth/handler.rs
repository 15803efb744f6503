//! Authentication Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use shared::request::LoginRequest;
use shared::response::{LoginResponse, UserInfo};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Verifies credentials and returns a JWT. Failures use one unified message
/// to prevent username enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_pool());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => {
            let password_valid = password::verify(&req.password, &u.password_hash)
                .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(&user.username, user.role)
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(username = %user.username, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            username: user.username,
            role: user.role,
        },
    }))
}

/// GET /api/auth/me - current caller info
pub async fn me(Extension(user): Extension<CurrentUser>) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo {
        username: user.username,
        role: user.role,
    }))
}
