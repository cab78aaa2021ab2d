// Server configuration loaded from environment variables.
// Decision: Parse through a lookup closure so tests never touch the process environment
// Decision: No database settings means in-memory storage (local development)

use anyhow::{Context, Result};

use crate::auth::AuthConfig;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Origin allowed when `CORS_ALLOWED_ORIGINS` is not set (local frontend dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

const DEFAULT_DB_HOST: &str = "localhost:5432";
const DEFAULT_DB_NAME: &str = "jobnest";

/// Runtime mode; controls cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == RuntimeMode::Production
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Postgres connection URL; `None` selects in-memory storage
    pub database_url: Option<String>,
    pub mode: RuntimeMode,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            mode: RuntimeMode::Development,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Recognized keys:
    /// - `PORT`: listening port (default 5000)
    /// - `DATABASE_URL`, or `DB_USER` + `DB_PASS` with optional `DB_HOST` / `DB_NAME`
    /// - `ACCESS_TOKEN_SECRET`: token signing secret
    /// - `ENVIRONMENT` or `NODE_ENV`: "production" enables secure cross-site cookies
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let database_url = get("DATABASE_URL").or_else(|| {
            let user = get("DB_USER")?;
            let pass = get("DB_PASS")?;
            let host = get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
            let name = get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
            Some(format!("postgres://{}:{}@{}/{}", user, pass, host, name))
        });

        let mode = get("ENVIRONMENT")
            .or_else(|| get("NODE_ENV"))
            .map(|s| RuntimeMode::from_str(&s))
            .unwrap_or_default();

        let cors_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let auth = AuthConfig::new(get("ACCESS_TOKEN_SECRET"), mode);

        Ok(Self {
            port,
            database_url,
            mode,
            cors_origins,
            auth,
        })
    }
}
