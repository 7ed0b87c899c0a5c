//! Login Use Case
//!
//! Verifies credentials and issues an access/refresh token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    token::{TokenKind, TokenPayload},
    user::User,
};
use crate::domain::repository::{CredentialStore, TokenService};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<U, T>
where
    U: CredentialStore,
    T: TokenService,
{
    store: Arc<U>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: CredentialStore,
    T: TokenService,
{
    pub fn new(store: Arc<U>, tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(AuthError::InvalidParam("password is required".into()));
        }

        let user = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        // a password the policy rejects can never match a stored hash
        let matched = match RawPassword::new(input.password) {
            Ok(raw) => user.password.verify(raw).await?,
            Err(_) => false,
        };
        if !matched {
            tracing::warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AuthError::InvalidPassword);
        }

        let payload = TokenPayload::new(user.id);
        let access_token = self
            .tokens
            .issue(&payload, self.config.ttl(TokenKind::Access))?;
        let refresh_token = self
            .tokens
            .issue(&payload, self.config.ttl(TokenKind::Refresh))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
