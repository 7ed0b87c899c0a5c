//! HTTP Handlers
//!
//! Mutating handlers take [`AuthenticatedUser`]; the router only lets a
//! request reach them through the access-token gate.

use std::sync::Arc;

use auth::AuthenticatedUser;
use auth::domain::repository::CredentialStore;
use axum::extract::State;
use axum::response::IntoResponse;
use kernel::extract::{JsonBody, PathParam, QueryParam};
use kernel::id::PostId;
use kernel::pagination::SearchParam;
use kernel::response::ApiResponse;
use kernel::tx::TransactionCoordinator;
use platform::sanitize::Sanitize;

use crate::application::config::BlogConfig;
use crate::application::{
    CreateCommentInput, CreateCommentUseCase, CreatePostInput, CreatePostUseCase,
    DeletePostInput, DeletePostUseCase, GetPostUseCase, ListCommentsUseCase, ListPostsUseCase,
    UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::{CommentStore, PostStore};
use crate::error::BlogResult;
use crate::presentation::dto::{CommentRequest, CommentResponse, PostRequest, PostResponse};

/// Shared state for blog handlers
pub struct BlogAppState<R, U, C>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub users: Arc<U>,
    pub coordinator: Arc<C>,
    pub sanitizer: Arc<dyn Sanitize>,
    pub config: Arc<BlogConfig>,
}

impl<R, U, C> BlogAppState<R, U, C>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    pub fn new(
        repo: Arc<R>,
        users: Arc<U>,
        coordinator: Arc<C>,
        sanitizer: Arc<dyn Sanitize>,
        config: BlogConfig,
    ) -> Self {
        Self {
            repo,
            users,
            coordinator,
            sanitizer,
            config: Arc::new(config),
        }
    }
}

impl<R, U, C> Clone for BlogAppState<R, U, C>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            users: Arc::clone(&self.users),
            coordinator: Arc::clone(&self.coordinator),
            sanitizer: Arc::clone(&self.sanitizer),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// GET /posts
pub async fn list_posts<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    QueryParam(param): QueryParam<SearchParam>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.config.clone());
    let page = use_case.execute(param).await?;

    let data: Vec<PostResponse> = page.items.into_iter().map(PostResponse::from).collect();
    Ok(ApiResponse::paginated(data, page.page, page.size, page.total))
}

/// GET /posts/{id}
pub async fn get_post<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    PathParam(id): PathParam<PostId>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let post = GetPostUseCase::new(state.repo.clone()).execute(id).await?;

    Ok(ApiResponse::ok(PostResponse::from(post)))
}

/// POST /posts
pub async fn create_post<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<PostRequest>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(
        state.repo.clone(),
        state.coordinator.clone(),
        state.sanitizer.clone(),
    );

    let post = use_case
        .execute(CreatePostInput {
            author_id: user.user_id,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok(ApiResponse::created(PostResponse::from(post)))
}

/// PUT /posts/{id}
pub async fn update_post<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<PostId>,
    JsonBody(req): JsonBody<PostRequest>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let use_case = UpdatePostUseCase::new(
        state.repo.clone(),
        state.coordinator.clone(),
        state.sanitizer.clone(),
    );

    let post = use_case
        .execute(UpdatePostInput {
            post_id: id,
            requester_id: user.user_id,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok(ApiResponse::ok(PostResponse::from(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<PostId>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    DeletePostUseCase::new(state.repo.clone(), state.coordinator.clone())
        .execute(DeletePostInput {
            post_id: id,
            requester_id: user.user_id,
        })
        .await?;

    Ok(ApiResponse::empty())
}

// ============================================================================
// Comments
// ============================================================================

/// GET /posts/{id}/comments
pub async fn list_comments<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    PathParam(post_id): PathParam<PostId>,
    QueryParam(param): QueryParam<SearchParam>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let use_case = ListCommentsUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );
    let page = use_case.execute(post_id, param).await?;

    let data: Vec<CommentResponse> = page.items.into_iter().map(CommentResponse::from).collect();
    Ok(ApiResponse::paginated(data, page.page, page.size, page.total))
}

/// POST /posts/{id}/comments
pub async fn create_comment<R, U, C>(
    State(state): State<BlogAppState<R, U, C>>,
    user: AuthenticatedUser,
    PathParam(post_id): PathParam<PostId>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> BlogResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
{
    let use_case = CreateCommentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.users.clone(),
        state.coordinator.clone(),
        state.sanitizer.clone(),
    );

    let comment = use_case
        .execute(CreateCommentInput {
            post_id,
            author_id: user.user_id,
            content: req.content,
        })
        .await?;

    Ok(ApiResponse::created(CommentResponse::from(comment)))
}
