use std::{env, path::PathBuf, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `DATABASE_URL` wins over the `DB_*` parts when both are present.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                required("DB_USERNAME")?,
                required("DB_PASSWORD")?,
                required("DB_ADDRESS")?,
                required("DB_PORT")?,
                required("DB_NAME")?
            ),
        };

        Ok(ServerConfig {
            database_url,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1".into()),
            port: parsed(&lookup, "PORT", 8080)?,
            static_dir: lookup("STATIC_DIR")
                .map_or_else(|| PathBuf::from("/app/static"), PathBuf::from),
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
