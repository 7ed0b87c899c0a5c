//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::value_object::{content::Content, post_title::PostTitle};

/// Post entity
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    /// Sanitized body
    pub content: Content,
    /// Author; fixed at creation
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; deleted posts are never returned by reads
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Replace title and content
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.content = changes.content;
        self.updated_at = Some(now);
    }

    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }
}

/// Data required to insert a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: Content,
    pub author_id: UserId,
}

/// Editable fields of a post
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: PostTitle,
    pub content: Content,
}
