//! Application Layer
//!
//! Content use cases and configuration.

pub mod config;
pub mod create_comment;
pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_comments;
pub mod list_posts;
pub mod update_post;

// Re-exports
pub use config::BlogConfig;
pub use create_comment::{CreateCommentInput, CreateCommentUseCase};
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::{DeletePostInput, DeletePostUseCase};
pub use get_post::GetPostUseCase;
pub use list_comments::ListCommentsUseCase;
pub use list_posts::ListPostsUseCase;
pub use update_post::{UpdatePostInput, UpdatePostUseCase};

/// One page of a listing
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    /// Matches across all pages
    pub total: u64,
}
