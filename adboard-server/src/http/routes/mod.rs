//! Route handlers organized by resource

pub mod ads;
pub mod health;
