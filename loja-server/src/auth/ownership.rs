//! Ownership Policy
//!
//! Owned resources carry the id of the identity that created them; the owner
//! reference is immutable after creation. Mutation (and, for pedidos, reads)
//! is allowed only to the owner. The decision compares ids and nothing else.
//!
//! Callers must check existence first: a missing resource is `NotFound`, never
//! `Forbidden`. The enforced order is (1) existence, (2) ownership, (3)
//! mutation.
//!
//! Two carve-outs exist by design and are not routed through this policy:
//! produtos reads are unscoped, and the public `PATCH /pedidos/{id}` route is
//! entirely credential-free (see `auth::middleware::is_public_route`).

use crate::utils::AppError;

/// Operations gated by ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedAction {
    /// Owner-scoped read (pedidos only)
    View,
    Update,
    Delete,
}

/// A persisted record carrying an immutable owner reference
pub trait Owned {
    /// Plural noun used in denial messages ("pedidos", "produtos")
    const PLURAL: &'static str;

    fn owner_id(&self) -> i64;
}

/// Allow iff the requester owns the resource
///
/// Denials carry the per-action human-readable reason, distinguishing them
/// from not-found outcomes.
pub fn authorize<R: Owned>(
    requester_id: i64,
    resource: &R,
    action: OwnedAction,
) -> Result<(), AppError> {
    if resource.owner_id() == requester_id {
        return Ok(());
    }

    let message = match action {
        OwnedAction::View => format!(
            "Acesso negado: você só pode visualizar seus próprios {}",
            R::PLURAL
        ),
        OwnedAction::Update => format!(
            "Acesso negado: você só pode alterar {} que você criou",
            R::PLURAL
        ),
        OwnedAction::Delete => format!(
            "Acesso negado: você só pode remover {} que você criou",
            R::PLURAL
        ),
    };

    Err(AppError::forbidden(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Caixa {
        owner: i64,
    }

    impl Owned for Caixa {
        const PLURAL: &'static str = "caixas";

        fn owner_id(&self) -> i64 {
            self.owner
        }
    }

    #[test]
    fn owner_is_allowed_for_every_action() {
        let caixa = Caixa { owner: 1 };
        for action in [OwnedAction::View, OwnedAction::Update, OwnedAction::Delete] {
            assert!(authorize(1, &caixa, action).is_ok());
        }
    }

    #[test]
    fn non_owner_is_denied_for_every_action() {
        let caixa = Caixa { owner: 1 };
        for action in [OwnedAction::View, OwnedAction::Update, OwnedAction::Delete] {
            assert!(matches!(
                authorize(2, &caixa, action),
                Err(AppError::Forbidden(_))
            ));
        }
    }

    #[test]
    fn denial_messages_name_the_action() {
        let caixa = Caixa { owner: 1 };

        let Err(AppError::Forbidden(msg)) = authorize(2, &caixa, OwnedAction::View) else {
            panic!("expected denial");
        };
        assert_eq!(
            msg,
            "Acesso negado: você só pode visualizar seus próprios caixas"
        );

        let Err(AppError::Forbidden(msg)) = authorize(2, &caixa, OwnedAction::Update) else {
            panic!("expected denial");
        };
        assert_eq!(msg, "Acesso negado: você só pode alterar caixas que você criou");

        let Err(AppError::Forbidden(msg)) = authorize(2, &caixa, OwnedAction::Delete) else {
            panic!("expected denial");
        };
        assert_eq!(msg, "Acesso negado: você só pode remover caixas que você criou");
    }
}
