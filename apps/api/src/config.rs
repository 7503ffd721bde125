use anyhow::{bail, Context, Result};

/// Longest accepted session lifetime: one year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset runs the service against the in-memory demo catalog.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret: require_env("JWT_SECRET")?,
            session_ttl_hours: validate_session_ttl(parse_env("SESSION_TTL_HOURS", 24 * 7)?)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn validate_session_ttl(hours: i64) -> Result<i64> {
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        bail!("SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got {hours}");
    }
    Ok(hours)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(validate_session_ttl(168).unwrap(), 168);
        assert_eq!(validate_session_ttl(MAX_SESSION_TTL_HOURS).unwrap(), MAX_SESSION_TTL_HOURS);
        assert!(validate_session_ttl(0).is_err());
        assert!(validate_session_ttl(-5).is_err());
        assert!(validate_session_ttl(i64::MAX).is_err());
    }
}
