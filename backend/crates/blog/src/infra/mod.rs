//! Infrastructure Layer
//!
//! PostgreSQL and in-memory store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryBlogRepository;
pub use postgres::PgBlogRepository;
