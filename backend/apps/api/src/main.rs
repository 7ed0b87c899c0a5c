//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthAppState, AuthConfig, JwtTokenService, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use blog::{BlogAppState, BlogConfig, PgBlogRepository, blog_router};
use kernel::tx::postgres::PgTransactor;
use platform::sanitize::HtmlSanitizer;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token keys are parsed once; a bad key stops startup
    let private_pem = tokio::fs::read(&config.jwt_private_key_path)
        .await
        .with_context(|| format!("reading {}", config.jwt_private_key_path.display()))?;
    let public_pem = tokio::fs::read(&config.jwt_public_key_path)
        .await
        .with_context(|| format!("reading {}", config.jwt_public_key_path.display()))?;
    let tokens = Arc::new(
        JwtTokenService::from_rsa_pem(&private_pem, &public_pem)
            .context("loading JWT key pair")?,
    );

    let transactor = Arc::new(PgTransactor::new(pool.clone()));
    let users = Arc::new(PgAuthRepository::new(pool.clone()));
    let blog_repo = Arc::new(PgBlogRepository::new(pool.clone()));

    let auth_config = AuthConfig {
        cookie_secure: config.cookie_secure,
        ..AuthConfig::default()
    };
    let auth_state = AuthAppState::new(users.clone(), transactor.clone(), tokens, auth_config);
    let gate = auth_state.gate();

    let blog_state = BlogAppState::new(
        blog_repo,
        users,
        transactor,
        Arc::new(HtmlSanitizer::new()),
        BlogConfig::default(),
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(auth_state))
        .merge(blog_router(blog_state, gate))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.server_addr);

    let listener = TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
