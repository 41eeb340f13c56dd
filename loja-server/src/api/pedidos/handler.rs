//! Pedido API Handlers
//!
//! Reads are scoped to the requester: the list query filters by owner and the
//! single-record read returns 403 for someone else's pedido. Mutations check
//! existence first, then ownership, then perform the change.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::parse_id;
use crate::auth::{CurrentUser, OwnedAction, authorize};
use crate::core::ServerState;
use crate::db::models::{PedidoCreate, PedidoFull, PedidoUpdate, PedidoWithUser};
use crate::db::repository::{PedidoRepository, RepoError};
use crate::utils::{AppError, AppResponse, AppResult, ok_message, ok_with_message};

const ID_INVALIDO: &str = "ID do pedido deve ser um número válido";
const NAO_ENCONTRADO: &str = "Pedido não encontrado";

/// Status applied by the public route when the query param is absent
const STATUS_PADRAO: &str = "pendente";

/// Map a lost update/delete race to the same 404 the caller would have seen
/// a moment earlier
fn race_to_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::conflict(NAO_ENCONTRADO),
        other => other.into(),
    }
}

/// GET /pedidos - pedidos do usuário autenticado
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<PedidoFull>>> {
    let repo = PedidoRepository::new(state.db.pool.clone());
    let pedidos = repo.find_all_by_user(user.id).await?;
    Ok(Json(pedidos))
}

/// GET /pedidos/{id} - buscar pedido (somente do próprio usuário)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<PedidoFull>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = PedidoRepository::new(state.db.pool.clone());
    let pedido = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    authorize(user.id, &pedido, OwnedAction::View)?;

    let full = repo
        .find_by_id_full(id)
        .await?
        .ok_or_else(|| AppError::conflict(NAO_ENCONTRADO))?;
    Ok(Json(full))
}

/// POST /pedidos - criar pedido com itens
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PedidoCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<PedidoFull>>)> {
    const OBRIGATORIOS: &str = "Valor e status são obrigatórios";
    let valor = payload
        .valor
        .ok_or_else(|| AppError::validation(OBRIGATORIOS))?;
    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(OBRIGATORIOS))?;

    let repo = PedidoRepository::new(state.db.pool.clone());
    let id = repo
        .create(user.id, valor, &status, &payload.produtos)
        .await?;

    let full = repo
        .find_by_id_full(id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Pedido {id} missing after create")))?;

    Ok((
        StatusCode::CREATED,
        ok_with_message("Pedido criado com sucesso", full),
    ))
}

/// PUT /pedidos/{id} - atualizar pedido (somente do próprio usuário)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PedidoUpdate>,
) -> AppResult<Json<AppResponse<PedidoWithUser>>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = PedidoRepository::new(state.db.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    authorize(user.id, &existing, OwnedAction::Update)?;

    repo.update(id, payload.valor, payload.status.as_deref())
        .await
        .map_err(race_to_not_found)?;

    let updated = repo
        .find_by_id_with_user(id)
        .await?
        .ok_or_else(|| AppError::conflict(NAO_ENCONTRADO))?;

    Ok(ok_with_message("Pedido atualizado com sucesso", updated))
}

/// DELETE /pedidos/{id} - remover pedido (somente do próprio usuário)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = PedidoRepository::new(state.db.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    authorize(user.id, &existing, OwnedAction::Delete)?;

    repo.delete(id).await.map_err(race_to_not_found)?;

    Ok(ok_message("Pedido removido com sucesso"))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// PATCH /pedidos/{id} - rota pública: marcar status do pedido
///
/// No identity, no ownership: any caller that reaches this endpoint with a
/// valid id may flip the status. The value comes from the `status` query
/// param, defaulting to `pendente`.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<AppResponse<PedidoFull>>> {
    let id = parse_id(&id, ID_INVALIDO)?;

    let repo = PedidoRepository::new(state.db.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NAO_ENCONTRADO))?;

    let status = query
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| STATUS_PADRAO.to_string());

    repo.update_status(id, &status)
        .await
        .map_err(race_to_not_found)?;

    let full = repo
        .find_by_id_full(id)
        .await?
        .ok_or_else(|| AppError::conflict(NAO_ENCONTRADO))?;

    Ok(ok_with_message(
        "Pedido marcado como concluído com sucesso",
        full,
    ))
}
