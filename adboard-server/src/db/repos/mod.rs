//! Ad repository abstraction and implementations
//!
//! Handlers only see [`AdRepository`]; the concrete store is chosen at
//! startup and injected through the application state.
//! - Every call is one atomic store operation
//! - Not-found is a `DbError::NotFound` value, never a panic
//! - Ids are strictly increasing and never reused

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{Ad, AdPatch, NewAd};

pub use memory::MemoryAdRepo;
pub use postgres::PgAdRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn ad_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "ad",
            id: id.to_string(),
        }
    }
}

/// CRUD contract for ads
#[async_trait]
pub trait AdRepository: Send + Sync + 'static {
    /// Persist a new ad, assigning its id and creation timestamp.
    async fn create(&self, ad: NewAd) -> Result<Ad, DbError>;

    /// Fetch an ad by id.
    async fn get(&self, id: i64) -> Result<Ad, DbError>;

    /// Merge the supplied fields into an existing ad and return the result.
    async fn update(&self, id: i64, patch: AdPatch) -> Result<Ad, DbError>;

    /// Remove an ad permanently.
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Short store name reported by the readiness check.
    fn store_name(&self) -> &'static str;

    /// Check that the store can serve requests right now.
    async fn ping(&self) -> Result<(), DbError>;
}
