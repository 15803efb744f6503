//! User management Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::PROTECTED_ADMIN;
use shared::request::CreateUserRequest;
use shared::response::{MessageResponse, UserInfo};

use crate::auth::password;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users - list accounts (never exposes hashes)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let repo = UserRepository::new(state.get_pool());
    let users = repo
        .find_all()
        .await?
        .into_iter()
        .map(|u| UserInfo {
            username: u.username,
            role: u.role,
        })
        .collect();
    Ok(Json(users))
}

/// POST /api/users - register a new account
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<UserInfo>> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    let repo = UserRepository::new(state.get_pool());
    if repo.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Username already exists: {}",
            req.username
        )));
    }

    let password_hash = password::hash(&req.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

    let user = shared::User {
        username: req.username,
        password_hash,
        role: req.role,
    };
    repo.create(&user).await?;

    tracing::info!(username = %user.username, role = %user.role, "User created");

    Ok(Json(UserInfo {
        username: user.username,
        role: user.role,
    }))
}

/// DELETE /api/users/{username} - remove an account.
/// The bootstrap admin is protected.
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if username == PROTECTED_ADMIN {
        return Err(AppError::Invalid(
            "Cannot delete the bootstrap admin account".to_string(),
        ));
    }

    let repo = UserRepository::new(state.get_pool());
    if !repo.delete(&username).await? {
        return Err(AppError::NotFound(format!("User {username}")));
    }

    tracing::info!(username = %username, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
