// Authentication middleware
// Decision: Cookie-only; the browser frontend never sees the token
// Decision: Decoded claims travel to handlers through request extensions

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use std::sync::Arc;

use super::{
    config::{AuthConfig, TOKEN_COOKIE},
    jwt::{TokenClaims, TokenError, TokenService},
};

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// The server cannot sign or check tokens at all
    pub fn misconfigured() -> Self {
        Self {
            error: "Authentication is not configured".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config));
        Self { config, tokens }
    }
}

/// Require a valid `token` cookie.
///
/// Rejects with 401 when the cookie is missing, empty, tampered with or
/// expired. On success the decoded claims are inserted into the request
/// extensions as `Arc<TokenClaims>`.
pub async fn verify_token(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            tracing::debug!("token cookie missing, authentication denied");
            AuthError::unauthorized("Unauthorized access")
        })?;

    let claims = state.tokens.verify(&token).map_err(|e| match e {
        TokenError::MissingSecret => {
            tracing::error!("cannot verify token: {}", e);
            AuthError::misconfigured()
        }
        other => {
            tracing::debug!("token validation failed: {}", other);
            AuthError::unauthorized("Unauthorized access")
        }
    })?;

    request.extensions_mut().insert(Arc::new(claims));
    Ok(next.run(request).await)
}

/// Check that the authenticated identity is the one being asked about.
///
/// A missing query email never matches.
pub fn authorize_owner(claims: &TokenClaims, query_email: Option<&str>) -> Result<(), AuthError> {
    if query_email == Some(claims.email.as_str()) {
        Ok(())
    } else {
        tracing::debug!(
            token_email = %claims.email,
            query_email = query_email.unwrap_or(""),
            "email mismatch, access forbidden"
        );
        Err(AuthError::forbidden("Forbidden access"))
    }
}
