//! Delete Post Use Case
//!
//! Soft delete: the row stays, `deleted_at` is set.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};
use kernel::tx::{Transaction, TransactionCoordinator};

use crate::domain::repository::PostStore;
use crate::error::{BlogError, BlogResult};

/// Delete post input
pub struct DeletePostInput {
    pub post_id: PostId,
    pub requester_id: UserId,
}

/// Delete post use case
pub struct DeletePostUseCase<P, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    posts: Arc<P>,
    coordinator: Arc<C>,
}

impl<P, C> DeletePostUseCase<P, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    pub fn new(posts: Arc<P>, coordinator: Arc<C>) -> Self {
        Self { posts, coordinator }
    }

    pub async fn execute(&self, input: DeletePostInput) -> BlogResult<()> {
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
                "Delete rejected: not the author"
            );
            return Err(BlogError::PostOwnerMismatch);
        }

        post.mark_deleted(Utc::now());
        self.posts.update(&mut tx, &post).await?;
        tx.commit().await?;

        tracing::info!(post_id = %post.id, "Post deleted");

        Ok(())
    }
}
