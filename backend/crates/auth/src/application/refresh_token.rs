//! Refresh Token Use Case
//!
//! Exchanges a valid refresh token for a new access token. The refresh
//! token itself is neither rotated nor invalidated.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::token::{TokenKind, TokenPayload};
use crate::domain::repository::TokenService;
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<T>
where
    T: TokenService,
{
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<T> RefreshTokenUseCase<T>
where
    T: TokenService,
{
    pub fn new(tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self { tokens, config }
    }

    pub fn execute(&self, refresh_token: &str) -> AuthResult<RefreshTokenOutput> {
        let payload = self.tokens.verify(refresh_token).map_err(|e| match e {
            AuthError::InvalidTokenMethod => AuthError::InvalidToken,
            other => other,
        })?;

        let access_token = self.tokens.issue(
            &TokenPayload::new(payload.user_id),
            self.config.ttl(TokenKind::Access),
        )?;

        tracing::info!(user_id = %payload.user_id, "Access token refreshed");

        Ok(RefreshTokenOutput { access_token })
    }
}
