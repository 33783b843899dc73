/// Database layer for Quillpad
///
/// This module provides the SQLite connection pool and the schema initializer.
///
/// # Modules
///
/// - `pool`: Pool creation, health checks and scoped connection guards
/// - `schema`: Table/index creation and demonstration rows
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use quillpad_shared::db::pool::{Database, DatabaseConfig};
/// use quillpad_shared::db::schema;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db = Database::connect(DatabaseConfig::default()).await?;
///
///     let mut conn = db.acquire().await?;
///     schema::initialize(&mut conn, true).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
