//! Store Traits
//!
//! Capability interfaces for post and comment persistence. Every read
//! excludes soft-deleted posts; writes run inside a caller-owned
//! transaction of type `Tx`.

use kernel::id::PostId;
use kernel::pagination::SearchParam;

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{NewPost, Post},
};
use crate::error::BlogResult;

/// Post store
#[trait_variant::make(PostStore: Send)]
pub trait LocalPostStore {
    /// Transaction handle accepted by write operations
    type Tx: Send;

    /// Insert a post
    async fn create(&self, tx: &mut Self::Tx, post: NewPost) -> BlogResult<Post>;

    /// Find a live post by ID
    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>>;

    /// Read a live post and lock it until `tx` ends
    ///
    /// A concurrent caller blocks here until the holder commits or rolls
    /// back, then observes the committed row.
    async fn select_for_update(&self, tx: &mut Self::Tx, id: PostId) -> BlogResult<Option<Post>>;

    /// Read a live post and hold a shared lock on it until `tx` ends
    ///
    /// Blocks a concurrent `select_for_update` on the same post, so the post
    /// cannot be soft-deleted while `tx` writes rows that reference it.
    async fn select_for_share(&self, tx: &mut Self::Tx, id: PostId) -> BlogResult<Option<Post>>;

    /// Persist title, content, `updated_at` and `deleted_at` of a locked post
    async fn update(&self, tx: &mut Self::Tx, post: &Post) -> BlogResult<()>;

    /// One page of live posts matching the search, newest first, plus the
    /// total number of matches
    async fn find_all(&self, param: &SearchParam) -> BlogResult<(Vec<Post>, u64)>;
}

/// Comment store
#[trait_variant::make(CommentStore: Send)]
pub trait LocalCommentStore {
    /// Transaction handle accepted by write operations
    type Tx: Send;

    /// Insert a comment
    async fn create(&self, tx: &mut Self::Tx, comment: NewComment) -> BlogResult<Comment>;

    /// One page of a post's comments, newest first, plus the total count
    async fn find_by_post_id(
        &self,
        post_id: PostId,
        param: &SearchParam,
    ) -> BlogResult<(Vec<Comment>, u64)>;
}
