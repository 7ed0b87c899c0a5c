//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::entity::token::TokenKind;

/// Access token cookie name
pub const ACCESS_COOKIE_NAME: &str = "AUTHORIZATION";
/// Refresh token cookie name
pub const REFRESH_COOKIE_NAME: &str = "REFRESH_TOKEN";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// Access token lifetime (10 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: ACCESS_COOKIE_NAME.to_string(),
            refresh_cookie_name: REFRESH_COOKIE_NAME.to_string(),
            access_token_ttl: Duration::from_secs(10 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Lifetime of a token kind
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }

    /// Cookie carrying a token kind; `Max-Age` equals the token lifetime
    pub fn cookie(&self, kind: TokenKind) -> CookieConfig {
        let name = match kind {
            TokenKind::Access => &self.access_cookie_name,
            TokenKind::Refresh => &self.refresh_cookie_name,
        };
        CookieConfig::new(name.as_str())
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(self.ttl(kind))
    }
}
