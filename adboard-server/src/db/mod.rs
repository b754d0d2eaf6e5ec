//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, one pooled connection per repository call
//! - One statement per operation, no check-then-write
//! - Store chosen at startup behind the `AdRepository` trait

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_lazy_pool, wait_for_database};
pub use repos::*;
pub use schema::ensure_schema;
