//! Repository Traits
//!
//! Capability interfaces for credential persistence and token handling.
//! Implementations live in the infrastructure layer.

use std::time::Duration;

use kernel::id::UserId;

use crate::domain::entity::{
    token::TokenPayload,
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential store
///
/// Lookups exclude soft-deleted users. Writes run inside a caller-owned
/// transaction of type `Tx`.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Transaction handle accepted by write operations
    type Tx: Send;

    /// Find a live user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find a live user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Insert a user; a duplicate email is [`AuthError::EmailAlreadyExists`]
    ///
    /// [`AuthError::EmailAlreadyExists`]: crate::error::AuthError::EmailAlreadyExists
    async fn create(&self, tx: &mut Self::Tx, user: NewUser) -> AuthResult<User>;
}

/// Token service
///
/// Issues signed tokens embedding a [`TokenPayload`] and verifies them.
/// Validity is purely signature plus time window; there is no revocation.
pub trait TokenService: Send + Sync {
    /// Issue a token valid from now until now + `ttl`
    fn issue(&self, payload: &TokenPayload, ttl: Duration) -> AuthResult<String>;

    /// Verify a token and return its payload
    ///
    /// - `InvalidTokenMethod` for a token declaring an unexpected algorithm
    /// - `InvalidToken` for anything else that fails
    fn verify(&self, token: &str) -> AuthResult<TokenPayload>;
}
