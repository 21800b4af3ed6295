//! Per-repository endpoints.
//!
//! - GET /{owner}/{repo}.svg?variant=&background=&line=&axis=
//!   Star history chart, served through the chart cache. A failed star fetch
//!   still answers 200 with an error image.
//!
//! - GET /{owner}/{repo}
//!   HTML page embedding the chart, or the index page with the error when
//!   the repository cannot be resolved.
//!
//! Path params must span whole segments, so both share one route and a
//! `.svg` suffix on `repo` selects the chart. The query is read as raw pairs
//! so a repeated option keeps its first value instead of failing the request.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::chart::{render_chart, ImageSource};
use crate::error::{AppError, Result};
use crate::models::{ChartParameters, ChartQuery};
use crate::pages;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/{owner}/{repo}", get(get_repo))
        .with_state(state)
}

async fn get_repo(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let query = ChartQuery::from_pairs(pairs);
    match repo.strip_suffix(".svg") {
        Some(repo) => get_repo_chart(&state, &owner, repo, &query).await,
        None => get_repo_page(&state, &owner, &repo).await,
    }
}

async fn get_repo_chart(
    state: &AppState,
    owner: &str,
    repo: &str,
    query: &ChartQuery,
) -> Result<Response> {
    let params = ChartParameters::extract(owner, repo, query)
        .inspect_err(|e| tracing::warn!("failed to extract params: {}", e))?;

    let image = tokio::time::timeout(
        state.request_timeout,
        render_chart(
            state.stars.as_ref(),
            state.cache.as_ref(),
            state.cache_ttl,
            &params,
        ),
    )
    .await
    .map_err(|_| AppError::Timeout)??;

    let cache_control = match image.source {
        ImageSource::Error => "no-cache, no-store".to_string(),
        ImageSource::Cache | ImageSource::Fresh => {
            format!("public, max-age={}", state.cache_ttl.as_secs())
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        image.body,
    )
        .into_response())
}

async fn get_repo_page(state: &AppState, owner: &str, repo: &str) -> Result<Response> {
    let params = ChartParameters::extract(owner, repo, &ChartQuery::default())?;

    let details = tokio::time::timeout(
        state.request_timeout,
        state.stars.repo_details(&params.name()),
    )
    .await
    .map_err(|_| AppError::Timeout)?;

    let html = match details {
        Ok(details) => pages::repository(state.version, &details),
        Err(e) => {
            tracing::info!("failed to resolve {}: {}", params.name(), e);
            pages::index(state.version, Some(&e.to_string()))
        }
    };

    Ok(Html(html).into_response())
}
