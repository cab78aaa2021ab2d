// Authentication configuration.
// Decision: Token lifetime is fixed at one hour
// Decision: Production serves a cross-site frontend, so the cookie is Secure + SameSite=None there

use std::time::Duration;

use axum_extra::extract::cookie::SameSite;

use crate::config::RuntimeMode;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of an issued session token
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Token and cookie settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing tokens; without it no token can be issued or verified
    pub secret: Option<String>,
    /// Token lifetime, also used as the cookie max-age
    pub token_lifetime: Duration,
    /// Whether the cookie is marked `Secure`
    pub cookie_secure: bool,
    /// `SameSite` attribute of the cookie
    pub same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_lifetime: TOKEN_LIFETIME,
            cookie_secure: false,
            same_site: SameSite::Strict,
        }
    }
}

impl AuthConfig {
    pub fn new(secret: Option<String>, mode: RuntimeMode) -> Self {
        let (cookie_secure, same_site) = if mode.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Strict)
        };
        Self {
            secret,
            token_lifetime: TOKEN_LIFETIME,
            cookie_secure,
            same_site,
        }
    }

    /// Convenience constructor for a given secret in development mode
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(Some(secret.into()), RuntimeMode::Development)
    }
}
