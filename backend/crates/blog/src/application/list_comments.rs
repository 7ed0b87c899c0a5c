//! List Comments Use Case
//!
//! Newest first. Listing comments of a missing or deleted post is
//! `PostNotFound`, not an empty page.

use std::sync::Arc;

use kernel::id::PostId;
use kernel::pagination::SearchParam;

use crate::application::Paged;
use crate::application::config::BlogConfig;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentStore, PostStore};
use crate::error::{BlogError, BlogResult};

/// List comments use case
pub struct ListCommentsUseCase<P, M>
where
    P: PostStore,
    M: CommentStore,
{
    posts: Arc<P>,
    comments: Arc<M>,
    config: Arc<BlogConfig>,
}

impl<P, M> ListCommentsUseCase<P, M>
where
    P: PostStore,
    M: CommentStore,
{
    pub fn new(posts: Arc<P>, comments: Arc<M>, config: Arc<BlogConfig>) -> Self {
        Self {
            posts,
            comments,
            config,
        }
    }

    pub async fn execute(&self, post_id: PostId, param: SearchParam) -> BlogResult<Paged<Comment>> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(BlogError::PostNotFound);
        }

        let param = self.config.comment_page(param);
        let (items, total) = self.comments.find_by_post_id(post_id, &param).await?;

        Ok(Paged {
            items,
            page: param.page,
            size: param.limit,
            total,
        })
    }
}
