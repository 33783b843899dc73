/// Post model and database operations
///
/// Posts belong to a user through `user_id`. Besides the plain row, two
/// read projections are provided:
///
/// - [`PostWithAuthor`]: every column plus the owner's username (inner join,
///   so posts whose owner is missing are skipped)
/// - [`PostSummary`]: the listing page row, with a comment count computed by a
///   left join (posts without comments count 0)
///
/// # Schema
///
/// ```sql
/// CREATE TABLE posts (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title VARCHAR(200) NOT NULL,
///     content TEXT NOT NULL,
///     user_id INTEGER NOT NULL,
///     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
///     FOREIGN KEY (user_id) REFERENCES users (id)
/// );
/// ```

use crate::error::WriteError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::debug;

/// Post row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,

    /// Owning user
    pub user_id: i64,

    pub created_at: NaiveDateTime,
}

/// Post row joined with its owner's username
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub username: String,
}

/// Listing-page projection of a post
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,

    /// Owner's username
    pub username: String,

    /// Number of comments referencing this post
    pub comment_count: i64,
}

/// Input for creating a new post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl Post {
    /// Inserts a new post and returns its id
    ///
    /// Whether `user_id` must name an existing user depends on the pool's
    /// foreign key setting.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Storage`] when the store rejects the row.
    pub async fn create(conn: &mut SqliteConnection, data: CreatePost) -> Result<i64, WriteError> {
        let result = sqlx::query("INSERT INTO posts (title, content, user_id) VALUES (?, ?, ?)")
            .bind(&data.title)
            .bind(&data.content)
            .bind(data.user_id)
            .execute(&mut *conn)
            .await?;

        let id = result.last_insert_rowid();
        debug!(post_id = id, user_id = data.user_id, "Post created");

        Ok(id)
    }

    /// Finds a post by ID
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, user_id, created_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Lists every post with its owner's username, newest first
    pub async fn list_with_authors(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.title, p.content, p.user_id, p.created_at, u.username
            FROM posts p
            JOIN users u ON p.user_id = u.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Lists every post with owner username and comment count, newest first
    pub async fn list_summaries(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        sqlx::query_as::<_, PostSummary>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, u.username,
                   COUNT(c.id) AS comment_count
            FROM posts p
            JOIN users u ON p.user_id = u.id
            LEFT JOIN comments c ON p.id = c.post_id
            GROUP BY p.id, p.title, p.content, p.created_at, u.username
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Counts total number of posts
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
