//! In-memory adapters
//!
//! Used by tests and local runs without PostgreSQL. The whole blog state
//! lives behind one [`MemoryDatabase`], so a transaction holds the writer
//! lock from `begin` until commit or drop; `select_for_update` therefore
//! serializes writers exactly like a row lock does.

use std::collections::BTreeMap;

use chrono::Utc;
use kernel::error::app_error::AppResult;
use kernel::id::{CommentId, PostId};
use kernel::pagination::SearchParam;
use kernel::tx::TransactionCoordinator;
use kernel::tx::memory::{MemoryDatabase, MemoryTx};

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{NewPost, Post},
};
use crate::domain::repository::{CommentStore, PostStore};
use crate::error::{BlogError, BlogResult};

/// Posts and comments keyed by id
#[derive(Debug, Clone, Default)]
pub struct BlogState {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_post_id: i64,
    last_comment_id: i64,
}

impl BlogState {
    fn live_post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id.value()).filter(|p| is_live(p))
    }
}

/// Soft-delete predicate for in-memory posts
fn is_live(post: &Post) -> bool {
    !post.is_deleted()
}

/// Newest first, ties broken by id
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn page<T>(items: Vec<T>, param: &SearchParam) -> Vec<T> {
    let offset = usize::try_from(param.offset()).unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(offset)
        .take(param.limit as usize)
        .collect()
}

/// In-memory post/comment store and transaction coordinator
#[derive(Clone, Default)]
pub struct MemoryBlogRepository {
    db: MemoryDatabase<BlogState>,
}

impl MemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a post regardless of its soft-delete marker (test inspection)
    pub fn stored_post(&self, id: PostId) -> Option<Post> {
        self.db.read(|s| s.posts.get(&id.value()).cloned())
    }
}

impl TransactionCoordinator for MemoryBlogRepository {
    type Tx = MemoryTx<BlogState>;

    async fn begin(&self) -> AppResult<Self::Tx> {
        self.db.begin().await
    }
}

impl PostStore for MemoryBlogRepository {
    type Tx = MemoryTx<BlogState>;

    async fn create(&self, tx: &mut MemoryTx<BlogState>, post: NewPost) -> BlogResult<Post> {
        let state = tx.state_mut();
        state.last_post_id += 1;

        let created = Post {
            id: PostId::new(state.last_post_id),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };
        state.posts.insert(state.last_post_id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        Ok(self.db.read(|s| s.live_post(id).cloned()))
    }

    async fn select_for_update(
        &self,
        tx: &mut MemoryTx<BlogState>,
        id: PostId,
    ) -> BlogResult<Option<Post>> {
        Ok(tx.state().live_post(id).cloned())
    }

    async fn select_for_share(
        &self,
        tx: &mut MemoryTx<BlogState>,
        id: PostId,
    ) -> BlogResult<Option<Post>> {
        Ok(tx.state().live_post(id).cloned())
    }

    async fn update(&self, tx: &mut MemoryTx<BlogState>, post: &Post) -> BlogResult<()> {
        let stored = tx
            .state_mut()
            .posts
            .get_mut(&post.id.value())
            .ok_or(BlogError::PostNotFound)?;

        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.updated_at = post.updated_at;
        stored.deleted_at = post.deleted_at;

        Ok(())
    }

    async fn find_all(&self, param: &SearchParam) -> BlogResult<(Vec<Post>, u64)> {
        let mut matched: Vec<Post> = self.db.read(|s| {
            s.posts
                .values()
                .filter(|p| is_live(p))
                .filter(|p| param.matches(&[p.title.as_str(), p.content.as_str()]))
                .cloned()
                .collect()
        });
        newest_first(&mut matched, |p| (p.created_at, p.id.value()));

        let total = matched.len() as u64;
        Ok((page(matched, param), total))
    }
}

impl CommentStore for MemoryBlogRepository {
    type Tx = MemoryTx<BlogState>;

    async fn create(
        &self,
        tx: &mut MemoryTx<BlogState>,
        comment: NewComment,
    ) -> BlogResult<Comment> {
        let state = tx.state_mut();

        // mirrors the foreign key, which also accepts deleted posts
        if !state.posts.contains_key(&comment.post_id.value()) {
            return Err(BlogError::PostNotFound);
        }

        state.last_comment_id += 1;
        let created = Comment {
            id: CommentId::new(state.last_comment_id),
            content: comment.content,
            post_id: comment.post_id,
            author_name: comment.author_name,
            created_at: Utc::now(),
        };
        state.comments.insert(state.last_comment_id, created.clone());

        Ok(created)
    }

    async fn find_by_post_id(
        &self,
        post_id: PostId,
        param: &SearchParam,
    ) -> BlogResult<(Vec<Comment>, u64)> {
        let mut matched: Vec<Comment> = self.db.read(|s| {
            s.comments
                .values()
                .filter(|c| c.post_id == post_id)
                .cloned()
                .collect()
        });
        newest_first(&mut matched, |c| (c.created_at, c.id.value()));

        let total = matched.len() as u64;
        Ok((page(matched, param), total))
    }
}
