//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{comment::Comment, post::Post};

// ============================================================================
// Post
// ============================================================================

/// Create / update post request
///
/// The author is always the authenticated user; an `author_id` field in the
/// body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

/// Post response
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title.into_db(),
            content: post.content.into_db(),
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Comment
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content.into_db(),
            post_id: comment.post_id,
            author_name: comment.author_name,
            created_at: comment.created_at,
        }
    }
}
