//! Update Post Use Case
//!
//! Lock, check owner, mutate, commit. A second concurrent update of the
//! same post waits on the row lock and then edits the committed result.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};
use kernel::tx::{Transaction, TransactionCoordinator};
use platform::sanitize::Sanitize;

use crate::domain::entity::post::{Post, PostChanges};
use crate::domain::repository::PostStore;
use crate::domain::value_object::{content::Content, post_title::PostTitle};
use crate::error::{BlogError, BlogResult};

/// Update post input
pub struct UpdatePostInput {
    pub post_id: PostId,
    pub requester_id: UserId,
    pub title: String,
    pub content: String,
}

/// Update post use case
pub struct UpdatePostUseCase<P, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    posts: Arc<P>,
    coordinator: Arc<C>,
    sanitizer: Arc<dyn Sanitize>,
}

impl<P, C> UpdatePostUseCase<P, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    pub fn new(posts: Arc<P>, coordinator: Arc<C>, sanitizer: Arc<dyn Sanitize>) -> Self {
        Self {
            posts,
            coordinator,
            sanitizer,
        }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> BlogResult<Post> {
        let changes = PostChanges {
            title: PostTitle::new(input.title)?,
            content: Content::sanitized(&input.content, self.sanitizer.as_ref())?,
        };

        // dropped without commit on any error below
        let mut tx = self.coordinator.begin().await?;
        let mut post = self
            .posts
            .select_for_update(&mut tx, input.post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if !post.is_owned_by(input.requester_id) {
            tracing::warn!(
                post_id = %post.id,
                requester_id = %input.requester_id,
                "Update rejected: not the author"
            );
            return Err(BlogError::PostOwnerMismatch);
        }

        post.apply(changes, Utc::now());
        self.posts.update(&mut tx, &post).await?;
        tx.commit().await?;

        tracing::info!(post_id = %post.id, "Post updated");

        Ok(post)
    }
}
