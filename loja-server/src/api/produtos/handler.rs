//! Produto API Handlers
//!
//! Unlike pedidos, list and get are not scoped to the requester. The
//! asymmetry is intentional: products are a shared catalog, orders are
//! private. Ownership still gates update and delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::parse_id;
use crate::auth::{CurrentUser, OwnedAction, authorize};
use crate::core::ServerState;
use crate::db::models::{ProdutoCreate, ProdutoUpdate, ProdutoWithUser};
use crate::db::repository::{ProdutoRepository, RepoError};
use crate::utils::{AppError, AppResponse, AppResult, ok_message, ok_with_message};

const ID_INVALIDO: &str = "ID do produto deve ser um número válido";
const NAO_ENCONTRADO: &str = "Produto não encontrado";
const STATUS_PADRAO: &str = "Disponivel";

fn race_to_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::conflict(NAO_ENCONTRADO),
        other => other.into(),
    }
}

/// GET /produtos - listar todos os produtos
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProdutoWithUser>>> {
    let repo = ProdutoRepository::new(state.db.pool.clone());
    let produtos = repo.find_all().await?;
    Ok(Json(produtos))
}

/// GET /produtos/{id} - buscar produto (sem escopo de dono)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProdutoWithUser>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = ProdutoRepository::new(state.db.pool.clone());
    let produto = repo
        .find_by_id_with_user(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;
    Ok(Json(produto))
}

/// POST /produtos - criar produto
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProdutoCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<ProdutoWithUser>>)> {
    const OBRIGATORIOS: &str = "Nome, preço e estoque são obrigatórios";
    let nome = payload
        .nome
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(OBRIGATORIOS))?;
    let preco = payload
        .preco
        .ok_or_else(|| AppError::validation(OBRIGATORIOS))?;
    let estoque = payload
        .estoque
        .ok_or_else(|| AppError::validation(OBRIGATORIOS))?;
    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| STATUS_PADRAO.to_string());

    let repo = ProdutoRepository::new(state.db.pool.clone());
    let id = repo
        .create(
            user.id,
            &nome,
            payload.descricao.as_deref(),
            preco,
            estoque,
            &status,
        )
        .await?;

    let produto = repo
        .find_by_id_with_user(id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Produto {id} missing after create")))?;

    Ok((
        StatusCode::CREATED,
        ok_with_message("Produto criado com sucesso", produto),
    ))
}

/// PUT /produtos/{id} - atualizar produto (somente do próprio usuário)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProdutoUpdate>,
) -> AppResult<Json<AppResponse<ProdutoWithUser>>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = ProdutoRepository::new(state.db.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    authorize(user.id, &existing, OwnedAction::Update)?;

    repo.update(id, &payload).await.map_err(race_to_not_found)?;

    let updated = repo
        .find_by_id_with_user(id)
        .await?
        .ok_or_else(|| AppError::conflict(NAO_ENCONTRADO))?;

    Ok(ok_with_message("Produto atualizado com sucesso", updated))
}

/// DELETE /produtos/{id} - remover produto (somente do próprio usuário)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = ProdutoRepository::new(state.db.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    authorize(user.id, &existing, OwnedAction::Delete)?;

    repo.delete(id).await.map_err(race_to_not_found)?;

    Ok(ok_message("Produto removido com sucesso"))
}
