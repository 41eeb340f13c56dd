//! Auth Handlers
//!
//! Registration, login, refresh exchange and the current-user probe. These
//! are the only places where credentials are issued; everything else just
//! verifies them.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, TokenError};
use crate::core::ServerState;
use crate::db::models::{User, UserSummary};
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Freshly issued credential pair plus the public user record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

fn issue_pair(state: &ServerState, user: &User) -> AppResult<TokenPair> {
    let identity = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };

    let access_token = state
        .tokens
        .issue_access(&identity)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let refresh_token = state
        .tokens
        .issue_refresh(&identity)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        user: user.summary(),
    })
}

fn required(field: Option<String>, message: &str) -> AppResult<String> {
    field
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(message))
}

/// POST /auth/register - criar usuário e emitir tokens
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<TokenPair>>)> {
    const OBRIGATORIOS: &str = "Nome, e-mail e senha são obrigatórios";
    let name = required(req.name, OBRIGATORIOS)?;
    let email = required(req.email, OBRIGATORIOS)?;
    let password = required(req.password, OBRIGATORIOS)?;

    let password_hash = User::hash_password(&password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .create(&name, &email, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::validation("E-mail já cadastrado"),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    let pair = issue_pair(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        ok_with_message("Usuário criado com sucesso", pair),
    ))
}

/// POST /auth/login - autenticar e emitir tokens
///
/// Unknown e-mail and wrong password produce the same 401, preventing
/// account enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<TokenPair>>> {
    const OBRIGATORIOS: &str = "E-mail e senha são obrigatórios";
    let email = required(req.email, OBRIGATORIOS)?;
    let password = required(req.password, OBRIGATORIOS)?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_valid = user
        .verify_password(&password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !password_valid {
        tracing::warn!(target: "security", email = %email, "Login failed - invalid credentials");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let pair = issue_pair(&state, &user)?;
    Ok(ok_with_message("Login realizado com sucesso", pair))
}

/// POST /auth/refresh - trocar um refresh token por um novo par
///
/// The refresh credential is verified on its own path; the user is re-read so
/// the new claims reflect current data, and a deleted user cannot refresh.
pub async fn refresh(
    State(state): State<ServerState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<Json<AppResponse<TokenPair>>> {
    let token = required(req.refresh_token, "Refresh token é obrigatório")?;

    let claims = state.tokens.verify_refresh(&token).map_err(|e| match e {
        TokenError::ExpiredToken => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .find_by_id(claims.user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    let pair = issue_pair(&state, &user)?;
    Ok(ok_with_message("Token renovado com sucesso", pair))
}

/// GET /auth/me - dados do usuário autenticado
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.pool.clone());
    let fresh = repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado"))?;
    Ok(Json(fresh))
}
