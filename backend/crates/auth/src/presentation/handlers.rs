//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use kernel::extract::JsonBody;
use kernel::response::ApiResponse;
use kernel::tx::TransactionCoordinator;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RefreshTokenUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::token::TokenKind;
use crate::domain::repository::{CredentialStore, TokenService};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest, RegisterResponse, UserResponse};
use crate::presentation::middleware::AuthGate;

/// Shared state for auth handlers
pub struct AuthAppState<U, C, T>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    pub store: Arc<U>,
    pub coordinator: Arc<C>,
    pub tokens: Arc<T>,
    pub config: Arc<AuthConfig>,
}

impl<U, C, T> AuthAppState<U, C, T>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    pub fn new(store: Arc<U>, coordinator: Arc<C>, tokens: Arc<T>, config: AuthConfig) -> Self {
        Self {
            store,
            coordinator,
            tokens,
            config: Arc::new(config),
        }
    }

    /// Access-control gate sharing this state's token service
    pub fn gate(&self) -> AuthGate<T> {
        AuthGate::new(Arc::clone(&self.tokens), &self.config)
    }
}

impl<U, C, T> Clone for AuthAppState<U, C, T>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            coordinator: Arc::clone(&self.coordinator),
            tokens: Arc::clone(&self.tokens),
            config: Arc::clone(&self.config),
        }
    }
}

fn set_cookie(config: &AuthConfig, kind: TokenKind, token: &str) -> AuthResult<HeaderValue> {
    config
        .cookie(kind)
        .set_cookie_header(token)
        .map_err(|e| AuthError::Internal(format!("Invalid cookie value: {}", e)))
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<U, C, T>(
    State(state): State<AuthAppState<U, C, T>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone(), state.coordinator.clone());

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(ApiResponse::created(RegisterResponse {
        id: output.user_id,
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
///
/// Sets both the access and refresh cookies.
pub async fn login<U, C, T>(
    State(state): State<AuthAppState<U, C, T>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let use_case = LoginUseCase::new(
        state.store.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let access_cookie = set_cookie(&state.config, TokenKind::Access, &output.access_token)?;
    let refresh_cookie = set_cookie(&state.config, TokenKind::Refresh, &output.refresh_token)?;

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        ApiResponse::ok(UserResponse::from(output.user)),
    ))
}

// ============================================================================
// Refresh Token
// ============================================================================

/// POST /refresh-token
///
/// Reads the refresh cookie and resets only the access cookie.
pub async fn refresh_token<U, C, T>(
    State(state): State<AuthAppState<U, C, T>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    C: TransactionCoordinator + Send + Sync + 'static,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx> + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let token = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidToken)?;

    let use_case = RefreshTokenUseCase::new(state.tokens.clone(), state.config.clone());
    let output = use_case.execute(&token)?;

    let access_cookie = set_cookie(&state.config, TokenKind::Access, &output.access_token)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, access_cookie)]),
        ApiResponse::empty(),
    ))
}
