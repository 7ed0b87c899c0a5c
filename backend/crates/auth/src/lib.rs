//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, capability traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL store, JWT token service, in-memory adapters
//! - `presentation/` - HTTP handlers, DTOs, router, access-control gate
//!
//! ## Features
//! - Register / login with email + password
//! - RS256 JWT access token (10 minutes) and refresh token (7 days),
//!   carried in the `AUTHORIZATION` and `REFRESH_TOKEN` cookies
//! - Refresh exchanges a refresh token for a new access token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Token verification rejects any algorithm outside RS256/RS384/RS512
//! - No server-side token state: validity is signature plus time window

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{JwtTokenService, MemoryAuthRepository, MemoryTokenService, PgAuthRepository};
pub use presentation::{
    AuthAppState, AuthGate, AuthenticatedUser, auth_router, require_access_token,
};
