// Session HTTP routes
// Decision: Login here only mints the cookie; credentials are checked by the frontend's identity provider

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    config::TOKEN_COOKIE,
    jwt::TokenError,
    middleware::{AuthError, AuthState},
};

/// Acknowledgement body for session routes
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Create session routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(clear_token))
        .with_state(state)
}

/// POST /jwt - Sign the posted user claims and set the `token` cookie
pub async fn issue_token(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(user): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<SuccessResponse>), AuthError> {
    let email = user
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let token = state.tokens.issue(user).map_err(|e| match e {
        TokenError::MissingEmail => AuthError::bad_request("An email address is required"),
        TokenError::MissingSecret => {
            tracing::error!("cannot issue token: {}", e);
            AuthError::misconfigured()
        }
        other => {
            tracing::error!("token generation error: {}", other);
            AuthError {
                error: "Token generation failed".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    })?;

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(state.config.same_site)
        .max_age(time::Duration::seconds(
            state.config.token_lifetime.as_secs() as i64,
        ))
        .build();

    tracing::info!(email = %email, "issued session token");
    Ok((jar.add(cookie), SuccessResponse::ok()))
}

/// POST /logout - Clear the `token` cookie
///
/// Always answers with a removal cookie, whether or not one was sent.
pub async fn clear_token(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let removal = Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(state.config.same_site)
        .max_age(time::Duration::ZERO)
        .build();

    tracing::info!("cleared session token");
    (jar.add(removal), SuccessResponse::ok())
}
