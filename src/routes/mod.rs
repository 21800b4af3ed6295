//! HTTP route handlers.
//!
//! Each submodule defines routes for a feature area:
//! - `index`: Landing page and repository form (GET/POST /)
//! - `repository`: Chart SVG and repository page (GET /{owner}/{repo}[.svg])
//! - `assets`: Embedded stylesheet and icons (GET /static/*)

pub mod assets;
pub mod index;
pub mod repository;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(index::routes(state.clone()))
        .merge(repository::routes(state))
        .merge(assets::routes())
}
