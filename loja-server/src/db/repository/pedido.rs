//! Pedido Repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{
    Pedido, PedidoFull, PedidoItemCreate, PedidoProdutoFull, PedidoWithUser, ProdutoResumo,
    UserSummary,
};

const PEDIDO_WITH_USER: &str = r#"
    SELECT p.id, p.valor, p.status, p.user_id, p.created_at, p.updated_at,
           u.name AS user_name, u.email AS user_email
    FROM pedidos p
    INNER JOIN users u ON u.id = p.user_id
"#;

const ITEMS_WITH_PRODUTO: &str = r#"
    SELECT pp.id, pp.pedido_id, pp.produto_id, pp.quantidade, pp.preco_unitario,
           pr.nome, pr.descricao, pr.preco, pr.status, pr.estoque
    FROM pedidos_produtos pp
    INNER JOIN produtos pr ON pr.id = pp.produto_id
    WHERE pp.pedido_id = ?
    ORDER BY pp.id
"#;

/// Flat row of a pedido joined with its owner
#[derive(FromRow)]
struct PedidoUserRow {
    id: i64,
    valor: f64,
    status: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_name: String,
    user_email: String,
}

impl PedidoUserRow {
    fn into_with_user(self) -> PedidoWithUser {
        PedidoWithUser {
            user: UserSummary {
                id: self.user_id,
                name: self.user_name,
                email: self.user_email,
            },
            pedido: Pedido {
                id: self.id,
                valor: self.valor,
                status: self.status,
                user_id: self.user_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

/// Flat row of a line item joined with its product
#[derive(FromRow)]
struct ItemRow {
    id: i64,
    pedido_id: i64,
    produto_id: i64,
    quantidade: i64,
    preco_unitario: f64,
    nome: String,
    descricao: Option<String>,
    preco: f64,
    status: String,
    estoque: i64,
}

impl ItemRow {
    fn into_full(self) -> PedidoProdutoFull {
        PedidoProdutoFull {
            id: self.id,
            pedido_id: self.pedido_id,
            produto_id: self.produto_id,
            quantidade: self.quantidade,
            preco_unitario: self.preco_unitario,
            produto: ProdutoResumo {
                id: self.produto_id,
                nome: self.nome,
                descricao: self.descricao,
                preco: self.preco,
                status: self.status,
                estoque: self.estoque,
            },
        }
    }
}

#[derive(Clone)]
pub struct PedidoRepository {
    pool: SqlitePool,
}

impl PedidoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all pedidos owned by one user, newest first, with owner and items
    pub async fn find_all_by_user(&self, user_id: i64) -> RepoResult<Vec<PedidoFull>> {
        let sql = format!("{PEDIDO_WITH_USER} WHERE p.user_id = ? ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PedidoUserRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut pedidos = Vec::with_capacity(rows.len());
        for row in rows {
            let with_user = row.into_with_user();
            let items = self.items_for(with_user.pedido.id).await?;
            pedidos.push(PedidoFull {
                pedido: with_user.pedido,
                user: with_user.user,
                pedidos_produtos: items,
            });
        }
        Ok(pedidos)
    }

    /// Find pedido by id (bare row, used for existence/ownership checks)
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Pedido>> {
        let pedido = sqlx::query_as::<_, Pedido>("SELECT * FROM pedidos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(pedido)
    }

    /// Find pedido by id with owner summary
    pub async fn find_by_id_with_user(&self, id: i64) -> RepoResult<Option<PedidoWithUser>> {
        let sql = format!("{PEDIDO_WITH_USER} WHERE p.id = ?");
        let row = sqlx::query_as::<_, PedidoUserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PedidoUserRow::into_with_user))
    }

    /// Find pedido by id with owner summary and line items
    pub async fn find_by_id_full(&self, id: i64) -> RepoResult<Option<PedidoFull>> {
        let Some(with_user) = self.find_by_id_with_user(id).await? else {
            return Ok(None);
        };
        let items = self.items_for(id).await?;
        Ok(Some(PedidoFull {
            pedido: with_user.pedido,
            user: with_user.user,
            pedidos_produtos: items,
        }))
    }

    /// Create a pedido and its line items as one atomic unit
    ///
    /// Either every row becomes visible or none does.
    pub async fn create(
        &self,
        user_id: i64,
        valor: f64,
        status: &str,
        itens: &[PedidoItemCreate],
    ) -> RepoResult<i64> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let pedido_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO pedidos (valor, status, user_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(valor)
        .bind(status)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for item in itens {
            sqlx::query(
                r#"INSERT INTO pedidos_produtos (pedido_id, produto_id, quantidade, preco_unitario)
                   VALUES (?, ?, ?, ?)"#,
            )
            .bind(pedido_id)
            .bind(item.produto_id)
            .bind(item.quantidade)
            .bind(item.preco_unitario)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(pedido_id)
    }

    /// Partially update a pedido; absent fields keep their current value
    ///
    /// A vanished row surfaces as [`RepoError::NotFound`].
    pub async fn update(
        &self,
        id: i64,
        valor: Option<f64>,
        status: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"UPDATE pedidos
               SET valor = COALESCE(?, valor),
                   status = COALESCE(?, status),
                   updated_at = ?
               WHERE id = ?"#,
        )
        .bind(valor)
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("pedido {id}")));
        }
        Ok(())
    }

    /// Set a pedido's status
    pub async fn update_status(&self, id: i64, status: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE pedidos SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("pedido {id}")));
        }
        Ok(())
    }

    /// Delete a pedido (line items cascade)
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("pedido {id}")));
        }
        Ok(())
    }

    async fn items_for(&self, pedido_id: i64) -> RepoResult<Vec<PedidoProdutoFull>> {
        let rows = sqlx::query_as::<_, ItemRow>(ITEMS_WITH_PRODUTO)
            .bind(pedido_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ItemRow::into_full).collect())
    }
}
