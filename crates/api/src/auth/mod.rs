// Cookie-based session authentication

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::{AuthConfig, TOKEN_COOKIE, TOKEN_LIFETIME};
pub use jwt::{TokenClaims, TokenError, TokenService};
pub use middleware::{authorize_owner, verify_token, AuthError, AuthState};
pub use routes::routes;
