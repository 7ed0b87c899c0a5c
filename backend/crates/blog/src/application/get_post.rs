//! Get Post Use Case

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostStore;
use crate::error::{BlogError, BlogResult};

/// Get post use case
pub struct GetPostUseCase<P>
where
    P: PostStore,
{
    posts: Arc<P>,
}

impl<P> GetPostUseCase<P>
where
    P: PostStore,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, id: PostId) -> BlogResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }
}
