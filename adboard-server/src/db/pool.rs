//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Startup blocks in
//! [`wait_for_database`] until the server accepts connections.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};

/// Create a pool that opens connections on first use.
pub fn create_lazy_pool(options: PgConnectOptions, max_connections: u32) -> PgPool {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(options)
}

/// Block until a connection to the database can be opened.
///
/// Retries indefinitely with a fixed delay. Each attempt opens a dedicated
/// connection and closes it again; the pool is not touched.
pub async fn wait_for_database(options: &PgConnectOptions, retry_delay: Duration) {
    let mut attempt: u64 = 1;

    loop {
        match PgConnection::connect_with(options).await {
            Ok(conn) => {
                if let Err(e) = conn.close().await {
                    tracing::debug!(error = %e, "startup check connection close failed");
                }
                tracing::info!(attempt, "PostgreSQL is ready");
                return;
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    error = %e,
                    retry_in_ms = retry_delay.as_millis() as u64,
                    "waiting for PostgreSQL"
                );
                tokio::time::sleep(retry_delay).await;
                attempt += 1;
            }
        }
    }
}
