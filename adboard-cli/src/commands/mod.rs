//! Command implementations for the adboard CLI

pub mod serve;

pub use serve::run_serve;
