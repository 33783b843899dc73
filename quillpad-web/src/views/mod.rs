/// HTML rendering
///
/// Pages are plain functions from query results to an HTML string. Every
/// value that came from the database or the request goes through [`escape`].
///
/// - `layout`: Shared page chrome, navigation and flash notifications
/// - `pages`: One function per page

pub mod layout;
pub mod pages;

pub use pages::{index_page, not_found_page, posts_page, users_page};

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }

    out
}
