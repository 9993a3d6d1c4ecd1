use draftboard_core::ballot::{RatingPolicy, DEFAULT_MIN_BATCH};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Ballot rules applied to every rating submission.
    pub rating: RatingPolicy,
    /// Admin account ensured at startup, if configured.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the admin account created on first start.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub mobile_number: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("mobile_number", &self.mobile_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                       |
    /// | `RATING_MIN_BATCH`         | `5`                        |
    /// | `RATING_MAX_FIVE_STAR`     | unset (no cap)             |
    /// | `RATING_MAX_ONE_STAR`      | unset (no cap)             |
    /// | `BOOTSTRAP_ADMIN_MOBILE`   | unset                      |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values so misconfiguration fails at
    /// startup rather than on the first request.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let rating = RatingPolicy {
            min_batch: std::env::var("RATING_MIN_BATCH")
                .unwrap_or_else(|_| DEFAULT_MIN_BATCH.to_string())
                .parse()
                .expect("RATING_MIN_BATCH must be a valid usize"),
            max_five_star: optional_cap("RATING_MAX_FIVE_STAR"),
            max_one_star: optional_cap("RATING_MAX_ONE_STAR"),
        };

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_MOBILE"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(mobile_number), Ok(password)) if !mobile_number.trim().is_empty() => {
                Some(BootstrapAdmin {
                    mobile_number: mobile_number.trim().to_string(),
                    password,
                })
            }
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            rating,
            bootstrap_admin,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read an optional distribution cap. Unset or blank disables the cap.
fn optional_cap(var: &str) -> Option<usize> {
    let raw = std::env::var(var).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.parse()
            .unwrap_or_else(|_| panic!("{var} must be a valid usize")),
    )
}
