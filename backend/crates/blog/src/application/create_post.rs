//! Create Post Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::tx::{Transaction, TransactionCoordinator};
use platform::sanitize::Sanitize;

use crate::domain::entity::post::{NewPost, Post};
use crate::domain::repository::PostStore;
use crate::domain::value_object::{content::Content, post_title::PostTitle};
use crate::error::BlogResult;

/// Create post input
pub struct CreatePostInput {
    /// Authenticated subject; never taken from the request body
    pub author_id: UserId,
    pub title: String,
    pub content: String,
}

/// Create post use case
pub struct CreatePostUseCase<P, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    posts: Arc<P>,
    coordinator: Arc<C>,
    sanitizer: Arc<dyn Sanitize>,
}

impl<P, C> CreatePostUseCase<P, C>
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

    pub async fn execute(&self, input: CreatePostInput) -> BlogResult<Post> {
        let title = PostTitle::new(input.title)?;
        let content = Content::sanitized(&input.content, self.sanitizer.as_ref())?;

        let mut tx = self.coordinator.begin().await?;
        let post = self
            .posts
            .create(
                &mut tx,
                NewPost {
                    title,
                    content,
                    author_id: input.author_id,
                },
            )
            .await?;
        tx.commit().await?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");

        Ok(post)
    }
}
