//! Comment Entity
//!
//! Comments are immutable once created. `author_name` is a copy of the
//! commenter's display name at the time of writing, not a live reference.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};

use crate::domain::value_object::content::Content;

/// Comment entity
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub content: Content,
    pub post_id: PostId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: Content,
    pub post_id: PostId,
    pub author_name: String,
}
