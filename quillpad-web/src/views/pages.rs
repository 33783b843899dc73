/// Page bodies
///
/// Each function receives exactly the data its handler queried.

use super::{escape, layout};
use crate::flash::Flash;
use quillpad_shared::models::{
    format_timestamp,
    post::PostSummary,
    stats::Stats,
    user::{User, UserOption},
};

/// Dashboard with row counts
pub fn index_page(stats: &Stats, flashes: &[Flash]) -> String {
    let cards: String = [
        ("users", "Users", stats.users),
        ("posts", "Posts", stats.posts),
        ("comments", "Comments", stats.comments),
    ]
    .iter()
    .map(|(key, label, value)| {
        format!(
            "<div class=\"card stat\"><div class=\"stat-value\" id=\"stat-{key}\">{value}</div><div class=\"meta\">{label}</div></div>\n"
        )
    })
    .collect();

    let mut content = format!("<section class=\"stats\">\n{cards}</section>\n");
    content.push_str(
        "<p class=\"meta\">Raw data: <a href=\"/api/users\">/api/users</a> · <a href=\"/api/posts\">/api/posts</a> · <a href=\"/api/stats\">/api/stats</a></p>\n",
    );

    layout::render("Dashboard", "/", flashes, &content)
}

/// Users table and add-user form
pub fn users_page(users: &[User], flashes: &[Flash]) -> String {
    let mut content = String::from(
        r#"<section class="card">
<h2>Add User</h2>
<form method="post" action="/add_user">
<label for="username">Username</label>
<input id="username" name="username" required>
<label for="email">Email</label>
<input id="email" name="email" type="email" required>
<button type="submit">Add User</button>
</form>
</section>
"#,
    );

    content.push_str("<section class=\"card\">\n");
    if users.is_empty() {
        content.push_str("<p>No users yet.</p>\n");
    } else {
        content.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Username</th><th>Email</th><th>Created</th></tr></thead>\n<tbody>\n",
        );
        content.extend(users.iter().map(|user| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                user.id,
                escape(&user.username),
                escape(&user.email),
                format_timestamp(&user.created_at),
            )
        }));
        content.push_str("</tbody>\n</table>\n");
    }
    content.push_str("</section>\n");

    layout::render("Users", "/users", flashes, &content)
}

/// Post list with comment counts, and the add-post form
///
/// `authors` populates the owner select list.
pub fn posts_page(posts: &[PostSummary], authors: &[UserOption], flashes: &[Flash]) -> String {
    let options: String = if authors.is_empty() {
        "<option value=\"\" disabled selected>No users available</option>".to_string()
    } else {
        authors
            .iter()
            .map(|author| {
                format!(
                    "<option value=\"{}\">{}</option>",
                    author.id,
                    escape(&author.username)
                )
            })
            .collect()
    };

    let mut content = format!(
        r#"<section class="card">
<h2>Add Post</h2>
<form method="post" action="/add_post">
<label for="title">Title</label>
<input id="title" name="title" maxlength="200" required>
<label for="content">Content</label>
<textarea id="content" name="content" rows="4" required></textarea>
<label for="user_id">Author</label>
<select id="user_id" name="user_id" required>{options}</select>
<button type="submit">Add Post</button>
</form>
</section>
"#
    );

    if posts.is_empty() {
        content.push_str("<section class=\"card\"><p>No posts yet.</p></section>\n");
    }
    content.extend(posts.iter().map(|post| {
        let noun = if post.comment_count == 1 { "comment" } else { "comments" };
        format!(
            "<article class=\"card\" id=\"post-{id}\">\n<h2>{title}</h2>\n<p>{body}</p>\n<p class=\"meta\">by {author} · {created} · <a href=\"/api/comments/{id}\"><span class=\"comment-count\">{count}</span> {noun}</a></p>\n</article>\n",
            id = post.id,
            title = escape(&post.title),
            body = escape(&post.content),
            author = escape(&post.username),
            created = format_timestamp(&post.created_at),
            count = post.comment_count,
            noun = noun,
        )
    }));

    layout::render("Posts", "/posts", flashes, &content)
}

/// Body of the 404 page
pub fn not_found_page() -> String {
    layout::render(
        "Page Not Found",
        "",
        &[],
        "<section class=\"card\"><p>The page you are looking for does not exist.</p><p><a href=\"/\">Back to the dashboard</a></p></section>\n",
    )
}
