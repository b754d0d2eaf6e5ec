//! Table auto-creation
//!
//! No migration history: the `ads` table is created if missing and left
//! alone otherwise.

use sqlx::PgPool;

const CREATE_ADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ads (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    owner VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)
"#;

/// Ensure the `ads` table exists.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring ads schema...");

    sqlx::query(CREATE_ADS_TABLE).execute(pool).await?;

    tracing::info!("Schema ready");
    Ok(())
}
