// Session token signing and verification
// Decision: HS256 with a single shared secret
// Decision: Whatever the client posted at login becomes the claims, email is the only required field

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::config::AuthConfig;

/// Claims the server sets or owns; client copies are discarded.
const RESERVED_CLAIMS: [&str; 4] = ["email", "exp", "iat", "nbf"];

/// Decoded session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    /// Identity asserted by the token
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Any other fields supplied at login
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("claims must include an email address")]
    MissingEmail,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("token lifetime out of range")]
    Lifetime(#[from] chrono::OutOfRangeError),
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Token service for issuing and validating session tokens
#[derive(Clone)]
pub struct TokenService {
    keys: Option<Keys>,
    lifetime: std::time::Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let keys = config.secret.as_ref().map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        Self {
            keys,
            lifetime: config.token_lifetime,
        }
    }

    /// Sign the given user claims with a fixed expiry.
    pub fn issue(&self, mut user: Map<String, Value>) -> Result<String, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        let email = match user.get("email") {
            Some(Value::String(email)) if !email.trim().is_empty() => email.clone(),
            _ => return Err(TokenError::MissingEmail),
        };
        for claim in RESERVED_CLAIMS {
            user.remove(claim);
        }

        let now = Utc::now();
        let exp = now + Duration::from_std(self.lifetime)?;
        let claims = TokenClaims {
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            extra: user,
        };

        Ok(encode(&Header::default(), &claims, &keys.encoding)?)
    }

    /// Validate a token's signature and expiry and return its claims
    ///
    /// Client-supplied `aud`, `iss` and `sub` are carried as plain data and
    /// never checked.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(token, &keys.decoding, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::with_secret("test-secret-key-for-testing"))
    }

    fn user(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let token = service
            .issue(user(json!({"email": "a@x.com", "name": "Ada"})))
            .unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra["name"], json!("Ada"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_client_cannot_choose_expiry() {
        let service = service();
        let token = service
            .issue(user(json!({"email": "a@x.com", "exp": 4102444800_i64, "iat": 0})))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.extra.contains_key("exp"));
    }

    #[test]
    fn test_issue_requires_email() {
        let service = service();
        assert!(matches!(
            service.issue(user(json!({"name": "Ada"}))),
            Err(TokenError::MissingEmail)
        ));
        assert!(matches!(
            service.issue(user(json!({"email": 42}))),
            Err(TokenError::MissingEmail)
        ));
        assert!(matches!(
            service.issue(user(json!({"email": "  "}))),
            Err(TokenError::MissingEmail)
        ));
    }

    #[test]
    fn test_missing_secret() {
        let service = TokenService::new(&AuthConfig::default());
        assert!(matches!(
            service.issue(user(json!({"email": "a@x.com"}))),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            service.verify("anything"),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_registered_claims_from_client_do_not_block_verification() {
        let service = service();
        let far_future = Utc::now().timestamp() + 10 * 24 * 3600;
        let token = service
            .issue(user(json!({
                "email": "a@x.com",
                "aud": "frontend",
                "iss": "someone",
                "sub": "user-1",
                "nbf": far_future
            })))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra["aud"], json!("frontend"));
        assert_eq!(claims.extra["sub"], json!("user-1"));
        assert!(!claims.extra.contains_key("nbf"));
    }

    #[test]
    fn test_invalid_token() {
        let service = service();
        assert!(matches!(
            service.verify("invalid-token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service()
            .issue(user(json!({"email": "a@x.com"})))
            .unwrap();
        let other = TokenService::new(&AuthConfig::with_secret("another-secret"));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test-secret-key-for-testing";
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            email: "a@x.com".to_string(),
            exp: now - 2 * 3600,
            iat: now - 3 * 3600,
            extra: Map::new(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }
}
