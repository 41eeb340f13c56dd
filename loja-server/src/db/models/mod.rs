//! Database Models

mod pedido;
mod produto;
mod user;

pub use pedido::{
    Pedido, PedidoCreate, PedidoFull, PedidoItemCreate, PedidoProdutoFull, PedidoUpdate,
    PedidoWithUser,
};
pub use produto::{Produto, ProdutoCreate, ProdutoResumo, ProdutoUpdate, ProdutoWithUser};
pub use user::{User, UserSummary};
