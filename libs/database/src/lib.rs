//! Database connectors for the workspace.
//!
//! Thin wrappers over sea-orm (PostgreSQL) and redis that add
//! env-based configuration and retry-with-backoff on connect.

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;
