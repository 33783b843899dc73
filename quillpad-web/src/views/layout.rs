/// Shared page chrome

use super::escape;
use crate::flash::Flash;

/// Navigation entries: (path, label)
const NAV: [(&str, &str); 3] = [("/", "Dashboard"), ("/users", "Users"), ("/posts", "Posts")];

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #1f2937; padding: 0 2rem; }
header nav a { color: #d1d5db; display: inline-block; padding: 1rem; text-decoration: none; }
header nav a.active { color: #fff; border-bottom: 2px solid #60a5fa; }
main { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.flash { padding: .75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.flash.success { background: #dcfce7; color: #166534; }
.flash.error { background: #fee2e2; color: #991b1b; }
.card { background: #fff; border-radius: 6px; padding: 1rem 1.5rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.stats { display: flex; gap: 1rem; }
.stat { flex: 1; text-align: center; }
.stat-value { font-size: 2.5rem; font-weight: 600; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #e5e7eb; }
form label { display: block; margin-top: .5rem; }
form input, form textarea, form select { width: 100%; padding: .4rem; box-sizing: border-box; }
form button { margin-top: .75rem; padding: .5rem 1rem; }
.meta { color: #6b7280; font-size: .875rem; }
"#;

/// Wraps page content in the document skeleton
///
/// `active` is the path of the navigation entry to highlight.
pub fn render(title: &str, active: &str, flashes: &[Flash], content: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(path, label)| {
            let class = if *path == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", path, class, label)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Quillpad</title>
<style>{style}</style>
</head>
<body>
<header><nav>{nav}</nav></header>
<main>
{flashes}<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        nav = nav,
        flashes = render_flashes(flashes),
        content = content,
    )
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                "<div class=\"flash {}\" role=\"alert\">{}</div>\n",
                flash.level.as_str(),
                escape(&flash.message)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_active_nav() {
        let html = render("Users", "/users", &[], "<p>body</p>");
        assert!(html.contains("<a href=\"/users\" class=\"active\">Users</a>"));
        assert!(html.contains("<a href=\"/posts\">Posts</a>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_render_flashes_escaped() {
        let html = render("Users", "/users", &[Flash::error("<b>bad</b>")], "");
        assert!(html.contains("<div class=\"flash error\" role=\"alert\">&lt;b&gt;bad&lt;/b&gt;</div>"));
    }
}
