//! Infrastructure Layer
//!
//! Database implementations, token signing and in-memory adapters.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtTokenService;
pub use memory::{MemoryAuthRepository, MemoryTokenService};
pub use postgres::PgAuthRepository;
