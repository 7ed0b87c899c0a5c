//! Value Object Module

pub mod content;
pub mod post_title;
