//! Landing page.
//!
//! - GET /
//!   Form asking for a repository.
//!
//! - POST / { repository: string }
//!   Accepts `owner/repo` or a GitHub URL and redirects to its page.

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::pages;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(handle_form))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::index(state.version, None))
}

#[derive(Debug, Deserialize)]
struct RepositoryForm {
    repository: String,
}

async fn handle_form(Form(form): Form<RepositoryForm>) -> Redirect {
    Redirect::to(&repository_path(&form.repository))
}

/// Path of the repository page for user input such as
/// `https://github.com/owner/repo` or `owner/repo`.
fn repository_path(input: &str) -> String {
    let mut repo = input.trim();
    for prefix in ["https://", "http://", "www.", "github.com/"] {
        repo = repo.strip_prefix(prefix).unwrap_or(repo);
    }
    let repo = repo.trim_matches('/');
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    format!("/{}", repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_path() {
        assert_eq!(
            repository_path("https://github.com/caarlos0/starcharts"),
            "/caarlos0/starcharts"
        );
        assert_eq!(
            repository_path("github.com/caarlos0/starcharts/"),
            "/caarlos0/starcharts"
        );
        assert_eq!(
            repository_path("https://www.github.com/caarlos0/starcharts.git"),
            "/caarlos0/starcharts"
        );
        assert_eq!(repository_path(" caarlos0/starcharts "), "/caarlos0/starcharts");
        assert_eq!(repository_path(""), "/");
    }
}
