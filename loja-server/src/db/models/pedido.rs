//! Pedido Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ProdutoResumo, UserSummary};
use crate::auth::Owned;

/// Pedido record
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: i64,
    pub valor: f64,
    pub status: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Pedido {
    const PLURAL: &'static str = "pedidos";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create pedido payload
///
/// Presence is validated at the handler; `produtos` line items are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoCreate {
    pub valor: Option<f64>,
    pub status: Option<String>,
    #[serde(default)]
    pub produtos: Vec<PedidoItemCreate>,
}

/// Line item of a pedido being created
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoItemCreate {
    pub produto_id: i64,
    #[serde(default = "default_quantidade")]
    pub quantidade: i64,
    pub preco_unitario: f64,
}

fn default_quantidade() -> i64 {
    1
}

/// Update pedido payload — absent fields keep their current value
#[derive(Debug, Clone, Deserialize)]
pub struct PedidoUpdate {
    pub valor: Option<f64>,
    pub status: Option<String>,
}

/// Pedido with its owner summary
#[derive(Debug, Serialize)]
pub struct PedidoWithUser {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub user: UserSummary,
}

/// Pedido with its owner summary and line items
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoFull {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub user: UserSummary,
    pub pedidos_produtos: Vec<PedidoProdutoFull>,
}

/// Line item with its product details
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoProdutoFull {
    pub id: i64,
    pub pedido_id: i64,
    pub produto_id: i64,
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub produto: ProdutoResumo,
}
