//! Identity Extractor
//!
//! Recovers the request identity from the `Authorization` header. The result
//! keeps missing-credential (`Unauthorized`) distinct from failed
//! verification (`InvalidToken` / `TokenExpired`); all three collapse into
//! the same 401 body at the HTTP boundary.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use http::HeaderMap;

use crate::auth::{CurrentUser, TokenError, TokenService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Recover an identity from the request headers
///
/// Absent header yields `Unauthorized`; a present but unverifiable credential
/// yields `TokenExpired` or `InvalidToken`. Never panics, never propagates
/// codec internals.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => TokenService::bearer_token(header).ok_or(AppError::InvalidToken)?,
        None => return Err(AppError::Unauthorized),
    };

    match tokens.verify_access(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(TokenError::ExpiredToken) => Err(AppError::TokenExpired),
        Err(_) => Err(AppError::InvalidToken),
    }
}

/// Extractor for protected handlers
///
/// Prefers the identity the auth middleware already attached to the request;
/// falls back to header extraction so handlers stay correct even when called
/// outside the gated pipeline.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, state.token_service())?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AuthConfig;
    use http::header::AUTHORIZATION;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig {
            access_secret: "access-secret-for-tests-0123456789abcdef".to_string(),
            refresh_secret: "refresh-secret-for-tests-0123456789abcdef".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        })
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let result = authenticate(&HeaderMap::new(), &service());
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_scheme_is_invalid_token() {
        let result = authenticate(&headers_with("Basic abc"), &service());
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn refresh_token_is_rejected_on_the_access_path() {
        let tokens = service();
        let user = CurrentUser {
            id: 7,
            email: "a@b.c".to_string(),
            name: "A".to_string(),
        };
        let refresh = tokens.issue_refresh(&user).unwrap();
        let result = authenticate(&headers_with(&format!("Bearer {refresh}")), &tokens);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn valid_token_yields_identity() {
        let tokens = service();
        let user = CurrentUser {
            id: 7,
            email: "a@b.c".to_string(),
            name: "A".to_string(),
        };
        let access = tokens.issue_access(&user).unwrap();
        let recovered = authenticate(&headers_with(&format!("Bearer {access}")), &tokens).unwrap();
        assert_eq!(recovered.id, 7);
        assert_eq!(recovered.email, "a@b.c");
    }
}
