//! Entity Module

pub mod comment;
pub mod post;
