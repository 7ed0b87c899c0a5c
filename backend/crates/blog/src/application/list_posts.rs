//! List Posts Use Case
//!
//! Search over title and content with offset pagination.

use std::sync::Arc;

use kernel::pagination::SearchParam;

use crate::application::Paged;
use crate::application::config::BlogConfig;
use crate::domain::entity::post::Post;
use crate::domain::repository::PostStore;
use crate::error::BlogResult;

/// List posts use case
pub struct ListPostsUseCase<P>
where
    P: PostStore,
{
    posts: Arc<P>,
    config: Arc<BlogConfig>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostStore,
{
    pub fn new(posts: Arc<P>, config: Arc<BlogConfig>) -> Self {
        Self { posts, config }
    }

    pub async fn execute(&self, param: SearchParam) -> BlogResult<Paged<Post>> {
        let param = self.config.post_page(param);
        let (items, total) = self.posts.find_all(&param).await?;

        Ok(Paged {
            items,
            page: param.page,
            size: param.limit,
            total,
        })
    }
}
