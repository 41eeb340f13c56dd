//! Produto Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::UserSummary;
use crate::auth::Owned;

/// Produto record
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub estoque: i64,
    pub status: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Produto {
    const PLURAL: &'static str = "produtos";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create produto payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProdutoCreate {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub estoque: Option<i64>,
    pub status: Option<String>,
}

/// Update produto payload — absent fields keep their current value
#[derive(Debug, Clone, Deserialize)]
pub struct ProdutoUpdate {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    pub estoque: Option<i64>,
    pub status: Option<String>,
}

/// Produto with its owner summary
#[derive(Debug, Serialize)]
pub struct ProdutoWithUser {
    #[serde(flatten)]
    pub produto: Produto,
    pub user: UserSummary,
}

/// Product fields embedded in pedido line items
#[derive(Debug, Serialize)]
pub struct ProdutoResumo {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub status: String,
    pub estoque: i64,
}
