use std::env;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    /// `None` means request bodies are not capped.
    pub limit_bytes: Option<usize>,
}

impl DatabaseSettings {
    /// Single-connection in-memory store; every pooled connection would otherwise see its own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            sqlx_logging: false,
        }
    }
}

/// Reads `.env` (if present) and the process environment once at startup.
pub fn get_configuration() -> anyhow::Result<Settings> {
    dotenv::dotenv().ok();
    Settings::from_lookup(|key| env::var(key).ok())
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a valid port: {raw}"))?,
            None => 5000,
        };

        let url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://issues.db?mode=rwc".to_string());
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => 5,
        };

        let dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static/uploads"));
        let limit_bytes = lookup("UPLOAD_LIMIT_BYTES")
            .map(|raw| {
                raw.parse::<usize>()
                    .with_context(|| format!("UPLOAD_LIMIT_BYTES is not a number: {raw}"))
            })
            .transpose()?;

        Ok(Self {
            application: ApplicationSettings { host, port },
            database: DatabaseSettings {
                url,
                max_connections: max_connections.max(1),
                sqlx_logging: true,
            },
            upload: UploadSettings { dir, limit_bytes },
        })
    }
}
