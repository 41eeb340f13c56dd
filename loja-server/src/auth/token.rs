//! Token Service
//!
//! Issues and verifies the two credential kinds (access and refresh). Each
//! kind is signed with its own secret and carries its own validity window, so
//! a credential of one kind never verifies on the other kind's path and a
//! leaked long-lived refresh token is never mistakable for an access token.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::AuthConfig;

/// Claims stored in both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// User e-mail
    pub email: String,
    /// Display name
    pub name: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Key material and validity window for one token kind
struct TokenKind {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenKind {
    fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    fn issue(&self, user: &CurrentUser) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // An expiration in the past must always fail, with no grace window.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

/// Token issuance and verification service
///
/// Built once at startup from [`AuthConfig`]; immutable afterwards.
pub struct TokenService {
    access: TokenKind,
    refresh: TokenKind,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: TokenKind::new(&config.access_secret, config.access_ttl_secs),
            refresh: TokenKind::new(&config.refresh_secret, config.refresh_ttl_secs),
        }
    }

    /// Issue a short-lived access token
    pub fn issue_access(&self, user: &CurrentUser) -> Result<String, TokenError> {
        self.access.issue(user)
    }

    /// Issue a long-lived refresh token
    pub fn issue_refresh(&self, user: &CurrentUser) -> Result<String, TokenError> {
        self.refresh.issue(user)
    }

    /// Verify an access token and return its claims
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.access.verify(token)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.refresh.verify(token)
    }

    /// Extract the credential from an `Authorization` header value
    ///
    /// The scheme prefix is the literal `Bearer ` — case-sensitive, single
    /// space. Anything else yields `None`.
    pub fn bearer_token(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Request-scoped identity recovered from a verified credential
///
/// Lives only for the duration of one request; never persisted.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_secret: "access-secret-for-tests-0123456789abcdef".to_string(),
            refresh_secret: "refresh-secret-for-tests-0123456789abcdef".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        }
    }

    fn maria() -> CurrentUser {
        CurrentUser {
            id: 42,
            email: "maria@example.com".to_string(),
            name: "Maria".to_string(),
        }
    }

    #[test]
    fn access_token_round_trip() {
        let service = TokenService::new(&test_config());
        let user = maria();

        let token = service.issue_access(&user).unwrap();
        let claims = service.verify_access(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "maria@example.com");
        assert_eq!(claims.name, "Maria");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_round_trip() {
        let service = TokenService::new(&test_config());
        let token = service.issue_refresh(&maria()).unwrap();
        let claims = service.verify_refresh(&token).unwrap();
        assert_eq!(claims.user_id, 42);
    }

    #[test]
    fn kinds_never_cross_verify() {
        let service = TokenService::new(&test_config());
        let user = maria();

        let access = service.issue_access(&user).unwrap();
        let refresh = service.issue_refresh(&user).unwrap();

        assert!(matches!(
            service.verify_refresh(&access),
            Err(TokenError::InvalidSignature)
        ));
        assert!(matches!(
            service.verify_access(&refresh),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = test_config();
        config.access_ttl_secs = -120;
        let service = TokenService::new(&config);

        let token = service.issue_access(&maria()).unwrap();
        assert!(matches!(
            service.verify_access(&token),
            Err(TokenError::ExpiredToken)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = TokenService::new(&test_config());
        let mut token = service.issue_access(&maria()).unwrap();
        token.push('x');
        assert!(service.verify_access(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_literal_and_case_sensitive() {
        assert_eq!(TokenService::bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(TokenService::bearer_token("bearer abc"), None);
        assert_eq!(TokenService::bearer_token("Bearer"), None);
        assert_eq!(TokenService::bearer_token("Token abc"), None);
        // Double space leaves a leading space in the credential, which then
        // fails verification downstream.
        assert_eq!(TokenService::bearer_token("Bearer  abc"), Some(" abc"));
    }
}
