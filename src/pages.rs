//! HTML pages: the index form and the per-repository chart page.

use crate::chart::svg::escape;
use crate::models::RepoDetails;

fn layout(title: &str, version: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
  <link rel="icon" href="/static/favicon.svg" type="image/svg+xml">
</head>
<body>
  <main>
{body}
  </main>
  <footer>starcharts {version}</footer>
</body>
</html>
"#,
        title = escape(title),
        version = escape(version),
        body = body,
    )
}

/// Landing page with the repository form, optionally showing an error.
pub fn index(version: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"    <p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"    <h1>Star charts</h1>
    <p>Plot the stargazers of a GitHub repository over time.</p>
{error}
    <form method="post" action="/">
      <input type="text" name="repository" placeholder="https://github.com/owner/repo" required>
      <button type="submit">Show chart</button>
    </form>"#
    );
    layout("Star charts", version, &body)
}

/// Repository page embedding its chart.
pub fn repository(version: &str, details: &RepoDetails) -> String {
    let name = escape(&details.full_name);
    let description = details
        .description
        .as_deref()
        .map(|d| format!("    <p>{}</p>\n", escape(d)))
        .unwrap_or_default();
    let body = format!(
        r#"    <h1><a href="https://github.com/{name}">{name}</a></h1>
{description}    <p>{stars} stars since {created}</p>
    <img src="/{name}.svg?variant=adaptive" alt="Star history of {name}" width="1024" height="400">
    <p><a href="/">Another repository</a></p>"#,
        stars = details.stargazers_count,
        created = details.created_at.format("%Y-%m-%d"),
    );
    layout(&details.full_name, version, &body)
}
