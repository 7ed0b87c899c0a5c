//! Blog (Posts & Comments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post and comment entities, value objects, store traits
//! - `application/` - Content use cases and configuration
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ownership Model
//! - A post belongs to the user who created it; `author_id` never changes
//! - Update and delete lock the row (`SELECT ... FOR UPDATE`), check the
//!   owner, mutate and commit inside one transaction
//! - Delete is a soft delete; deleted posts are invisible to every read
//! - Comments are immutable and carry a snapshot of the author's name

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::{MemoryBlogRepository, PgBlogRepository};
pub use presentation::{BlogAppState, blog_router};
