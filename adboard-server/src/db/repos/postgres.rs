//! PostgreSQL ad repository
//!
//! Each method is a single statement against the pool:
//! - create: INSERT ... RETURNING (identity column assigns the id)
//! - update: COALESCE merge in one UPDATE, so absent fields keep their value
//! - delete: rows_affected decides not-found (no check-then-delete)

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AdRepository, DbError};
use crate::models::{creation_timestamp, Ad, AdPatch, NewAd};

/// Ad repository backed by a connection pool
#[derive(Debug, Clone)]
pub struct PgAdRepo {
    pool: PgPool,
}

impl PgAdRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdRepository for PgAdRepo {
    async fn create(&self, new: NewAd) -> Result<Ad, DbError> {
        let ad: Ad = sqlx::query_as(
            r#"
            INSERT INTO ads (title, description, owner, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, owner, created_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.owner)
        .bind(creation_timestamp())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(ad_id = ad.id, "ad created");
        Ok(ad)
    }

    async fn get(&self, id: i64) -> Result<Ad, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, title, description, owner, created_at
            FROM ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::ad_not_found(id))
    }

    async fn update(&self, id: i64, patch: AdPatch) -> Result<Ad, DbError> {
        let ad: Ad = sqlx::query_as(
            r#"
            UPDATE ads
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                owner = COALESCE($4, owner)
            WHERE id = $1
            RETURNING id, title, description, owner, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.owner.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::ad_not_found(id))?;

        tracing::debug!(ad_id = id, "ad updated");
        Ok(ad)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::ad_not_found(id));
        }

        tracing::debug!(ad_id = id, "ad deleted");
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
