/// Aggregate row counts
///
/// Three independent `COUNT(*)` queries, one per table, run on the same
/// connection.

use super::{comment::Comment, post::Post, user::User};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

/// Row counts for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub users: i64,
    pub posts: i64,
    pub comments: i64,
}

impl Stats {
    /// Counts users, posts and comments
    pub async fn collect(conn: &mut SqliteConnection) -> Result<Self, sqlx::Error> {
        Ok(Self {
            users: User::count(conn).await?,
            posts: Post::count(conn).await?,
            comments: Comment::count(conn).await?,
        })
    }
}
