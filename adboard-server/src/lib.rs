//! adboard-server: classified ads CRUD over HTTP
//!
//! Ads are created, read, partially updated and deleted through JSON
//! endpoints. Storage sits behind the [`db::AdRepository`] trait with a
//! PostgreSQL and an in-memory implementation.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::DatabaseConfig;
pub use db::{AdRepository, DbError, MemoryAdRepo, PgAdRepo};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Ad, AdPatch, NewAd, ValidationError};
