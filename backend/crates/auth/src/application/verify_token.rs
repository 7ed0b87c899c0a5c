//! Verify Token Use Case
//!
//! Resolves an access token to its subject. Used by the access-control gate.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::TokenService;
use crate::error::AuthResult;

/// Verify token use case
pub struct VerifyTokenUseCase<T>
where
    T: TokenService,
{
    tokens: Arc<T>,
}

impl<T> VerifyTokenUseCase<T>
where
    T: TokenService,
{
    pub fn new(tokens: Arc<T>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, token: &str) -> AuthResult<UserId> {
        let payload = self.tokens.verify(token)?;
        Ok(payload.user_id)
    }
}

impl<T: TokenService> Clone for VerifyTokenUseCase<T> {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
        }
    }
}
