/// Comment model and database operations
///
/// Comments are only ever written by the seed step; the application reads
/// them per post.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     content TEXT NOT NULL,
///     post_id INTEGER NOT NULL,
///     user_id INTEGER NOT NULL,
///     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
///     FOREIGN KEY (post_id) REFERENCES posts (id),
///     FOREIGN KEY (user_id) REFERENCES users (id)
/// );
/// ```

use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

/// Comment row joined with the commenting user's username
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub username: String,
}

/// Namespace for comment queries
pub struct Comment;

impl Comment {
    /// Lists the comments on one post with commenter usernames, newest first
    ///
    /// The post id is not checked against `posts`; an unknown id simply yields
    /// an empty list.
    pub async fn list_for_post(
        conn: &mut SqliteConnection,
        post_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.created_at, u.username
            FROM comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.post_id = ?
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Counts total number of comments
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
