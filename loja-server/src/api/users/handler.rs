//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::parse_id;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /users - listar usuários
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.db.pool.clone());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// GET /users/{id} - buscar usuário
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id, "ID do usuário deve ser um número válido")?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado"))?;
    Ok(Json(user))
}
