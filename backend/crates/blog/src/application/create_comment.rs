//! Create Comment Use Case
//!
//! The commenter and the target post must both exist. The post is read
//! inside the inserting transaction, so a concurrent soft delete either
//! waits for the comment to commit or is observed and rejected. The
//! commenter's display name is copied onto the comment.

use std::sync::Arc;

use auth::domain::repository::CredentialStore;
use kernel::id::{PostId, UserId};
use kernel::tx::{Transaction, TransactionCoordinator};
use platform::sanitize::Sanitize;

use crate::domain::entity::comment::{Comment, NewComment};
use crate::domain::repository::{CommentStore, PostStore};
use crate::domain::value_object::content::Content;
use crate::error::{BlogError, BlogResult};

/// Create comment input
pub struct CreateCommentInput {
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
}

/// Create comment use case
pub struct CreateCommentUseCase<P, M, U, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
    M: CommentStore<Tx = <C as TransactionCoordinator>::Tx>,
    U: CredentialStore,
{
    posts: Arc<P>,
    comments: Arc<M>,
    users: Arc<U>,
    coordinator: Arc<C>,
    sanitizer: Arc<dyn Sanitize>,
}

impl<P, M, U, C> CreateCommentUseCase<P, M, U, C>
where
    C: TransactionCoordinator,
    P: PostStore<Tx = <C as TransactionCoordinator>::Tx>,
    M: CommentStore<Tx = <C as TransactionCoordinator>::Tx>,
    U: CredentialStore,
{
    pub fn new(
        posts: Arc<P>,
        comments: Arc<M>,
        users: Arc<U>,
        coordinator: Arc<C>,
        sanitizer: Arc<dyn Sanitize>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
            coordinator,
            sanitizer,
        }
    }

    pub async fn execute(&self, input: CreateCommentInput) -> BlogResult<Comment> {
        let content = Content::sanitized(&input.content, self.sanitizer.as_ref())?;

        let author = self
            .users
            .find_by_id(input.author_id)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        let mut tx = self.coordinator.begin().await?;

        // the shared lock keeps the post live until the comment commits
        if self
            .posts
            .select_for_share(&mut tx, input.post_id)
            .await?
            .is_none()
        {
            return Err(BlogError::PostNotFound);
        }

        let comment = self
            .comments
            .create(
                &mut tx,
                NewComment {
                    content,
                    post_id: input.post_id,
                    author_name: author.name.into_db(),
                },
            )
            .await?;
        tx.commit().await?;

        tracing::info!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            author_id = %input.author_id,
            "Comment created"
        );

        Ok(comment)
    }
}
