//! Auth Router

use axum::{Router, routing::post};

use kernel::tx::TransactionCoordinator;

use crate::domain::repository::{CredentialStore, TokenService};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router
///
/// All routes are public; `/refresh-token` authenticates through the
/// refresh cookie itself.
pub fn auth_router<U, C, T>(state: AuthAppState<U, C, T>) -> Router
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<U, C, T>))
        .route("/login", post(handlers::login::<U, C, T>))
        .route("/refresh-token", post(handlers::refresh_token::<U, C, T>))
        .with_state(state)
}
