//! Blog Router

use auth::domain::repository::{CredentialStore, TokenService};
use auth::{AuthGate, require_access_token};
use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post, put},
};

use kernel::tx::TransactionCoordinator;

use crate::domain::repository::{CommentStore, PostStore};
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router
///
/// Reads are public. Creating, updating and deleting posts and creating
/// comments go through the access-token gate.
pub fn blog_router<R, U, C, T>(state: BlogAppState<R, U, C>, gate: AuthGate<T>) -> Router
where
    C: TransactionCoordinator + Send + Sync + 'static,
    R: PostStore<Tx = <C as TransactionCoordinator>::Tx>
        + CommentStore<Tx = <C as TransactionCoordinator>::Tx>
        + Send
        + Sync
        + 'static,
    U: CredentialStore + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let public_routes = Router::new()
        .route("/posts", get(handlers::list_posts::<R, U, C>))
        .route("/posts/{id}", get(handlers::get_post::<R, U, C>))
        .route(
            "/posts/{id}/comments",
            get(handlers::list_comments::<R, U, C>),
        );

    let protected_routes = Router::new()
        .route("/posts", post(handlers::create_post::<R, U, C>))
        .route(
            "/posts/{id}",
            put(handlers::update_post::<R, U, C>).delete(handlers::delete_post::<R, U, C>),
        )
        .route(
            "/posts/{id}/comments",
            post(handlers::create_comment::<R, U, C>),
        )
        .route_layer(from_fn_with_state(gate, require_access_token::<T>));

    public_routes.merge(protected_routes).with_state(state)
}
