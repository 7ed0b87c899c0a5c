//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    token::{TokenKind, TokenPayload},
    user::{NewUser, User},
};
pub use repository::{CredentialStore, TokenService};
