//! # Quillpad Web Server Library
//!
//! Server-rendered pages and read-only JSON endpoints over the Quillpad
//! users/posts/comments store.
//!
//! ## Modules
//!
//! - `app`: Application state, per-request connection extractor, router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `flash`: One-shot notifications carried in a signed cookie
//! - `middleware`: Security headers
//! - `routes`: Route handlers
//! - `telemetry`: Tracing subscriber setup
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod routes;
pub mod telemetry;
pub mod views;
