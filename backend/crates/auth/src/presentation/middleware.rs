//! Auth Middleware
//!
//! Access-control gate for protected routes. The gate reads the access
//! token cookie, verifies it and places an [`AuthenticatedUser`] in the
//! request extensions. Handlers take [`AuthenticatedUser`] as an extractor,
//! so a protected handler body never runs without a verified subject.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::VerifyTokenUseCase;
use crate::domain::repository::TokenService;
use crate::error::AuthError;

/// Gate state
pub struct AuthGate<T>
where
    T: TokenService + 'static,
{
    verify: VerifyTokenUseCase<T>,
    cookie_name: Arc<str>,
}

impl<T> AuthGate<T>
where
    T: TokenService + 'static,
{
    pub fn new(tokens: Arc<T>, config: &AuthConfig) -> Self {
        Self {
            verify: VerifyTokenUseCase::new(tokens),
            cookie_name: Arc::from(config.access_cookie_name.as_str()),
        }
    }
}

impl<T> Clone for AuthGate<T>
where
    T: TokenService + 'static,
{
    fn clone(&self) -> Self {
        Self {
            verify: self.verify.clone(),
            cookie_name: Arc::clone(&self.cookie_name),
        }
    }
}

/// Middleware that requires a valid access token
///
/// Use with `axum::middleware::from_fn_with_state(gate, require_access_token::<T>)`.
pub async fn require_access_token<T>(
    State(gate): State<AuthGate<T>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    T: TokenService + 'static,
{
    let token = extract_cookie(req.headers(), &gate.cookie_name)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidToken)?;

    let user_id = gate.verify.execute(&token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Verified subject of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}
