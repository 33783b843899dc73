/// Read-only JSON endpoints
///
/// Each entity has its own wire struct built from the row type, so the JSON
/// shape does not follow schema changes by accident. Timestamps are rendered
/// as `YYYY-MM-DD HH:MM:SS`.
///
/// # Endpoints
///
/// - `GET /api/users` - `{ "users": [...] }`, newest first
/// - `GET /api/posts` - `{ "posts": [...] }` with author username, newest first
/// - `GET /api/comments/:post_id` - `{ "comments": [...] }` with commenter username
/// - `GET /api/stats` - `{ "users": n, "posts": n, "comments": n }`

use crate::{
    app::DbConn,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use quillpad_shared::models::{
    comment::{Comment, CommentWithAuthor},
    format_timestamp,
    post::{Post, PostWithAuthor},
    stats::Stats,
    user::User,
};
use serde::{Deserialize, Serialize};

/// User as exposed over JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserJson {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserJson {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

/// Post with its owner's username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostJson {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: String,
    pub username: String,
}

impl From<&PostWithAuthor> for PostJson {
    fn from(post: &PostWithAuthor) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            created_at: format_timestamp(&post.created_at),
            username: post.username.clone(),
        }
    }
}

/// Comment with the commenter's username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentJson {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: String,
    pub username: String,
}

impl From<&CommentWithAuthor> for CommentJson {
    fn from(comment: &CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            created_at: format_timestamp(&comment.created_at),
            username: comment.username.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserJson>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<PostJson>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentJson>,
}

/// All users, newest first
pub async fn list_users(DbConn(mut conn): DbConn) -> ApiResult<Json<UsersResponse>> {
    let users = User::list_recent(&mut conn).await?;

    Ok(Json(UsersResponse {
        users: users.iter().map(UserJson::from).collect(),
    }))
}

/// All posts whose owner exists, newest first
pub async fn list_posts(DbConn(mut conn): DbConn) -> ApiResult<Json<PostsResponse>> {
    let posts = Post::list_with_authors(&mut conn).await?;

    Ok(Json(PostsResponse {
        posts: posts.iter().map(PostJson::from).collect(),
    }))
}

/// Comments on one post, newest first
///
/// A non-integer id is a 404, as if the route did not exist. An id with no
/// comments yields an empty list.
pub async fn list_comments(
    post_id: Result<Path<i64>, PathRejection>,
    DbConn(mut conn): DbConn,
) -> ApiResult<Json<CommentsResponse>> {
    let Path(post_id) = post_id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Invalid post id");
        ApiError::NotFound("Post id must be an integer".to_string())
    })?;

    let comments = Comment::list_for_post(&mut conn, post_id).await?;

    Ok(Json(CommentsResponse {
        comments: comments.iter().map(CommentJson::from).collect(),
    }))
}

/// Row counts per table
pub async fn stats(DbConn(mut conn): DbConn) -> ApiResult<Json<Stats>> {
    Ok(Json(Stats::collect(&mut conn).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 1,
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            created_at: NaiveDateTime::parse_from_str("2025-09-24 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        let value = serde_json::to_value(UserJson::from(&user)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "username": "john_doe",
                "email": "john@example.com",
                "created_at": "2025-09-24 10:30:00",
            })
        );
    }
}
