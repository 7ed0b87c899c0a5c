//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed integer IDs for users, posts and comments
//! - Pagination parameters and the JSON response envelope
//! - The transaction coordinator capability (PostgreSQL + in-memory)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod pagination;
#[cfg(feature = "axum")]
pub mod response;
pub mod tx;
