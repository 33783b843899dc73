/// Route handlers
///
/// - `pages`: server-rendered pages and the two form endpoints
/// - `api`: read-only JSON endpoints
/// - `health`: health check

pub mod api;
pub mod health;
pub mod pages;
