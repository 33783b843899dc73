/// Database models for Quillpad
///
/// Each model owns the SQL for its table. Functions take a
/// `&mut SqliteConnection` so callers decide how long the connection is held;
/// in the web server that is one request.
///
/// # Models
///
/// - `user`: User accounts (created through the add-user form)
/// - `post`: Posts with owner and comment count projections
/// - `comment`: Comments (created only by the seed step)
/// - `stats`: Row counts across all three tables
///
/// # Example
///
/// ```no_run
/// use quillpad_shared::db::pool::{Database, DatabaseConfig};
/// use quillpad_shared::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::connect(DatabaseConfig::default()).await?;
/// let mut conn = db.acquire().await?;
///
/// let id = User::create(
///     &mut conn,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod post;
pub mod stats;
pub mod user;

use chrono::NaiveDateTime;

/// Format of `created_at` columns as written by SQLite's `CURRENT_TIMESTAMP`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a stored timestamp the way SQLite wrote it
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}
