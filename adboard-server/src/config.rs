//! Database configuration
//!
//! Either a full `DATABASE_URL` or the individual connection parts
//! (`DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`). The URL wins
//! when both are given. The CLI binds these to flags and environment
//! variables.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Fixed delay between startup connection attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; overrides the parts below
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Delay between connection attempts while waiting for the database
    pub retry_delay: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "ads".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl DatabaseConfig {
    /// Build connect options without splicing credentials into a URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is set and cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }

        Ok(options)
    }

    /// Host/port/database for log lines (never includes the password).
    pub fn display_target(&self) -> String {
        match self.connect_options() {
            Ok(opts) => format!(
                "{}:{}/{}",
                opts.get_host(),
                opts.get_port(),
                opts.get_database().unwrap_or_default()
            ),
            Err(_) => "<invalid database url>".to_string(),
        }
    }
}
