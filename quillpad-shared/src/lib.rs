//! # Quillpad Shared Library
//!
//! This crate contains the storage layer used by the Quillpad web server and
//! the `init-db` command.
//!
//! ## Module Organization
//!
//! - `db`: SQLite connection pool, scoped connections, schema and seed data
//! - `models`: Row types and the queries that read and write them
//! - `error`: Write failure classification

pub mod db;
pub mod error;
pub mod models;

/// Current version of the Quillpad shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
