//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use kernel::pagination::SearchParam;
use kernel::tx::postgres::PgTx;
use sqlx::PgPool;

use crate::domain::entity::{
    comment::{Comment, NewComment},
    post::{NewPost, Post},
};
use crate::domain::repository::{CommentStore, PostStore};
use crate::domain::value_object::{content::Content, post_title::PostTitle};
use crate::error::{BlogError, BlogResult};

/// `SELECT` over live posts only; the single place the soft-delete
/// predicate is written for this table.
macro_rules! select_live_posts {
    ($condition:literal) => {
        select_live_posts!(
            "id, title, content, author_id, created_at, updated_at, deleted_at",
            $condition
        )
    };
    ($columns:literal, $condition:literal) => {
        concat!(
            "SELECT ",
            $columns,
            " FROM posts WHERE deleted_at IS NULL AND ",
            $condition
        )
    };
}

/// PostgreSQL-backed post and comment store
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn page_bounds(param: &SearchParam) -> BlogResult<(i64, i64)> {
    let offset = i64::try_from(param.offset())
        .map_err(|_| BlogError::InvalidParam("page is out of range".into()))?;
    Ok((i64::from(param.limit), offset))
}

fn count_to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

// ============================================================================
// Post Store Implementation
// ============================================================================

impl PostStore for PgBlogRepository {
    type Tx = PgTx;

    async fn create(&self, tx: &mut PgTx, post: NewPost) -> BlogResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author_id, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, title, content, author_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.author_id.value())
        .fetch_one(tx.conn())
        .await
        .map_err(|e| BlogError::from_insert(e, BlogError::UserNotFound))?;

        Ok(row.into_post())
    }

    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(select_live_posts!("id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn select_for_update(&self, tx: &mut PgTx, id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(select_live_posts!("id = $1 FOR UPDATE"))
            .bind(id.value())
            .fetch_optional(tx.conn())
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn select_for_share(&self, tx: &mut PgTx, id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(select_live_posts!("id = $1 FOR SHARE"))
            .bind(id.value())
            .fetch_optional(tx.conn())
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update(&self, tx: &mut PgTx, post: &Post) -> BlogResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = $4, deleted_at = $5
            WHERE id = $1
            "#,
        )
        .bind(post.id.value())
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.updated_at)
        .bind(post.deleted_at)
        .execute(tx.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::PostNotFound);
        }

        Ok(())
    }

    async fn find_all(&self, param: &SearchParam) -> BlogResult<(Vec<Post>, u64)> {
        let pattern = param.like_pattern();
        let (limit, offset) = page_bounds(param)?;

        let total: i64 = sqlx::query_scalar(select_live_posts!(
            "COUNT(*)",
            r"($1::text IS NULL OR title ILIKE $1 ESCAPE '\' OR content ILIKE $1 ESCAPE '\')"
        ))
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, PostRow>(select_live_posts!(
            r"($1::text IS NULL OR title ILIKE $1 ESCAPE '\' OR content ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(PostRow::into_post).collect(),
            count_to_total(total),
        ))
    }
}

// ============================================================================
// Comment Store Implementation
// ============================================================================

impl CommentStore for PgBlogRepository {
    type Tx = PgTx;

    async fn create(&self, tx: &mut PgTx, comment: NewComment) -> BlogResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (content, post_id, author_name, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, content, post_id, author_name, created_at
            "#,
        )
        .bind(comment.content.as_str())
        .bind(comment.post_id.value())
        .bind(&comment.author_name)
        .fetch_one(tx.conn())
        .await
        .map_err(|e| BlogError::from_insert(e, BlogError::PostNotFound))?;

        Ok(row.into_comment())
    }

    async fn find_by_post_id(
        &self,
        post_id: PostId,
        param: &SearchParam,
    ) -> BlogResult<(Vec<Comment>, u64)> {
        let (limit, offset) = page_bounds(param)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id.value())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, post_id, author_name, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id.value())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(CommentRow::into_comment).collect(),
            count_to_total(total),
        ))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::new(self.id),
            title: PostTitle::from_db(self.title),
            content: Content::from_db(self.content),
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    post_id: i64,
    author_name: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::new(self.id),
            content: Content::from_db(self.content),
            post_id: PostId::new(self.post_id),
            author_name: self.author_name,
            created_at: self.created_at,
        }
    }
}
