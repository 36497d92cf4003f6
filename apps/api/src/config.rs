use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_port(std::env::var("PORT").ok())?,
            db_max_connections: parse_db_max_connections(
                std::env::var("DB_MAX_CONNECTIONS").ok(),
            )?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_port(value: Option<String>) -> Result<u16> {
    match value {
        Some(raw) => raw
            .parse::<u16>()
            .context("PORT must be a valid port number"),
        None => Ok(DEFAULT_PORT),
    }
}

fn parse_db_max_connections(value: Option<String>) -> Result<u32> {
    match value {
        Some(raw) => raw
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer"),
        None => Ok(DEFAULT_DB_MAX_CONNECTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), 8080);
    }

    #[test]
    fn test_port_parses_explicit_value() {
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
    }

    #[test]
    fn test_port_rejects_non_numeric_value() {
        let err = parse_port(Some("eight".to_string())).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_db_max_connections_defaults_when_unset() {
        assert_eq!(parse_db_max_connections(None).unwrap(), 10);
    }

    #[test]
    fn test_db_max_connections_rejects_non_numeric_value() {
        assert!(parse_db_max_connections(Some("many".to_string())).is_err());
    }
}
