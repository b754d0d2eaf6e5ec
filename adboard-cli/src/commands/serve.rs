//! HTTP server command for the adboard API
//!
//! Startup order for PostgreSQL: wait for the database (retrying forever),
//! create the `ads` table if missing, then bind and serve. The pool is closed
//! after graceful shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use adboard_server::db::{create_lazy_pool, ensure_schema, wait_for_database};
use adboard_server::{run_server, AppState, DatabaseConfig, MemoryAdRepo, PgAdRepo, ServerConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

/// Backing store for ads
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL (table auto-created on startup)
    Postgres,
    /// Process memory; data is lost on exit
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ADBOARD_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Backing store
    #[arg(long, value_enum, env = "ADBOARD_STORE", default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Full database URL (overrides the --db-* parts)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "ads")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    /// Delay between startup connection attempts, in milliseconds
    #[arg(long, env = "DB_RETRY_DELAY_MS", default_value_t = 1000)]
    pub db_retry_delay_ms: u64,
}

impl ServeArgs {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            max_connections: self.db_max_connections,
            retry_delay: Duration::from_millis(self.db_retry_delay_ms),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let server_config = args.server_config();

    match args.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; ads are lost on exit");
            run_server(AppState::new(MemoryAdRepo::new()), server_config)
                .await
                .context("Server error")?;
        }
        StoreKind::Postgres => {
            let db = args.database_config();
            let options = db
                .connect_options()
                .context("Invalid database configuration")?;

            tracing::info!(target_db = %db.display_target(), "Connecting to PostgreSQL");
            wait_for_database(&options, db.retry_delay).await;

            let pool = create_lazy_pool(options, db.max_connections);
            ensure_schema(&pool)
                .await
                .context("Failed to create ads table")?;

            let result = run_server(AppState::new(PgAdRepo::new(pool.clone())), server_config)
                .await
                .context("Server error");

            pool.close().await;
            result?;
        }
    }

    Ok(())
}
