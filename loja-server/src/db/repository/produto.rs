//! Produto Repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{Produto, ProdutoUpdate, ProdutoWithUser, UserSummary};

const PRODUTO_WITH_USER: &str = r#"
    SELECT p.id, p.nome, p.descricao, p.preco, p.estoque, p.status,
           p.user_id, p.created_at, p.updated_at,
           u.name AS user_name, u.email AS user_email
    FROM produtos p
    INNER JOIN users u ON u.id = p.user_id
"#;

/// Flat row of a produto joined with its owner
#[derive(FromRow)]
struct ProdutoUserRow {
    id: i64,
    nome: String,
    descricao: Option<String>,
    preco: f64,
    estoque: i64,
    status: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_name: String,
    user_email: String,
}

impl ProdutoUserRow {
    fn into_with_user(self) -> ProdutoWithUser {
        ProdutoWithUser {
            user: UserSummary {
                id: self.user_id,
                name: self.user_name,
                email: self.user_email,
            },
            produto: Produto {
                id: self.id,
                nome: self.nome,
                descricao: self.descricao,
                preco: self.preco,
                estoque: self.estoque,
                status: self.status,
                user_id: self.user_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: SqlitePool,
}

impl ProdutoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all produtos, newest first, with owner summaries
    ///
    /// Listing is deliberately unscoped: every user's products are visible.
    pub async fn find_all(&self) -> RepoResult<Vec<ProdutoWithUser>> {
        let sql = format!("{PRODUTO_WITH_USER} ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, ProdutoUserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ProdutoUserRow::into_with_user).collect())
    }

    /// Find produto by id (bare row, used for existence/ownership checks)
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Produto>> {
        let produto = sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produto)
    }

    /// Find produto by id with owner summary
    pub async fn find_by_id_with_user(&self, id: i64) -> RepoResult<Option<ProdutoWithUser>> {
        let sql = format!("{PRODUTO_WITH_USER} WHERE p.id = ?");
        let row = sqlx::query_as::<_, ProdutoUserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ProdutoUserRow::into_with_user))
    }

    /// Create a new produto owned by `user_id`
    pub async fn create(
        &self,
        user_id: i64,
        nome: &str,
        descricao: Option<&str>,
        preco: f64,
        estoque: i64,
        status: &str,
    ) -> RepoResult<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO produtos (nome, descricao, preco, estoque, status, user_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(nome)
        .bind(descricao)
        .bind(preco)
        .bind(estoque)
        .bind(status)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Partially update a produto; absent fields keep their current value
    ///
    /// A vanished row surfaces as [`RepoError::NotFound`].
    pub async fn update(&self, id: i64, data: &ProdutoUpdate) -> RepoResult<()> {
        let result = sqlx::query(
            r#"UPDATE produtos
               SET nome = COALESCE(?, nome),
                   descricao = COALESCE(?, descricao),
                   preco = COALESCE(?, preco),
                   estoque = COALESCE(?, estoque),
                   status = COALESCE(?, status),
                   updated_at = ?
               WHERE id = ?"#,
        )
        .bind(data.nome.as_deref())
        .bind(data.descricao.as_deref())
        .bind(data.preco)
        .bind(data.estoque)
        .bind(data.status.as_deref())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("produto {id}")));
        }
        Ok(())
    }

    /// Delete a produto
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("produto {id}")));
        }
        Ok(())
    }
}
