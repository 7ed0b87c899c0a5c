//! Domain Layer
//!
//! Contains entities, value objects, and store traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    comment::{Comment, NewComment},
    post::{NewPost, Post, PostChanges},
};
pub use repository::{CommentStore, PostStore};
