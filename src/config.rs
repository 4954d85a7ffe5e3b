use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error as ThisError;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Runtime settings, read from the process environment (after `.env`).
///
/// Database credentials come from `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`
/// and `DB_NAME`, unless `DATABASE_URL` is set, which takes precedence.
#[derive(Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub max_connections: u32,
    pub http_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl)?,
            None => {
                let user = get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let password = get("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?;
                let name = get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
                let host = get("DB_HOST").unwrap_or(DEFAULT_DB_HOST);
                let port = parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?;
                PgConnectOptions::new()
                    .host(host)
                    .port(port)
                    .username(user)
                    .password(password)
                    .database(name)
            }
        };

        Ok(Config {
            database,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            http_port: parse_or("PORT", get("PORT"), DEFAULT_HTTP_PORT)?,
            log_level: get("LOG_LEVEL").unwrap_or(DEFAULT_LOG_LEVEL).to_string(),
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builds_connection_from_parts_with_defaults() {
        let cfg = Config::from_vars(vars(&[
            ("DB_USER", "marcos"),
            ("DB_PASSWORD", "segredo"),
            ("DB_NAME", "bnbb"),
        ]))
        .unwrap();
        assert_eq!(cfg.database.get_host(), "localhost");
        assert_eq!(cfg.database.get_port(), 5432);
        assert_eq!(cfg.database.get_username(), "marcos");
        assert_eq!(cfg.database.get_database(), Some("bnbb"));
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn password_is_never_defaulted() {
        let err = Config::from_vars(vars(&[("DB_USER", "marcos"), ("DB_NAME", "bnbb")]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Missing("DB_PASSWORD")));
    }

    #[test]
    fn database_url_takes_precedence() {
        let cfg = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://ana:x@db.internal:6543/banco"),
            ("DB_HOST", "ignored"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(cfg.database.get_host(), "db.internal");
        assert_eq!(cfg.database.get_port(), 6543);
        assert_eq!(cfg.database.get_database(), Some("banco"));
        assert_eq!(cfg.http_port, 9000);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = Config::from_vars(vars(&[
            ("DB_USER", "marcos"),
            ("DB_PASSWORD", "segredo"),
            ("DB_NAME", "bnbb"),
            ("DB_PORT", "porta"),
        ]))
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::Invalid { name: "DB_PORT", .. }));
    }
}
