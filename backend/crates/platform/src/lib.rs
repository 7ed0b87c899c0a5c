//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Cookie management
//! - HTML sanitization of user-authored text

pub mod cookie;
pub mod password;
pub mod sanitize;
