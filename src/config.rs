/*
 * Responsibility
 * - Environment/config loading (DATABASE_URL, JWT settings, etc.)
 * - Validation of required values (startup fails if missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,

    // Symmetric secret every verification reads; loaded once, never rotated in-process.
    pub jwt_secret: String,
    // Clock-skew tolerance for exp/nbf, in seconds. Zero unless overridden.
    pub jwt_leeway_seconds: u64,
    // Role a user must hold to administer their own audience.
    pub jwt_admin_role: String,
    // Fallback target audience when verified claims carry an empty `aud`.
    pub jwt_default_audience: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let jwt_leeway_seconds = std::env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let jwt_admin_role =
            std::env::var("JWT_ADMIN_ROLE").unwrap_or_else(|_| "admin".to_string());

        let jwt_default_audience = std::env::var("JWT_DEFAULT_AUDIENCE")
            .ok()
            .filter(|s| !s.is_empty());

        Ok(Self {
            addr,
            app_env,
            database_url,
            jwt_secret,
            jwt_leeway_seconds,
            jwt_admin_role,
            jwt_default_audience,
        })
    }
}

// Unset falls back to the default; set-but-unparsable is a startup error,
// not a silent fallback.
fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT")),
        None => Ok(3000),
    }
}
