// GitHub API HTTP client.
// Resolves repositories and pages through their stargazers.

use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::models::{RepoDetails, Stargazer};

use super::{GitHubError, StarSource};

const GITHUB_API_VERSION: &str = "2022-11-28";
/// Media type that adds `starred_at` to stargazer listings.
const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";
const PER_PAGE: u32 = 100;

/// GitHub REST client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    max_pages: u32,
    page_concurrency: usize,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = config.github_token.as_deref().filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| GitHubError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("starcharts"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
            max_pages: config.max_pages,
            page_concurrency: config.page_concurrency.max(1),
        })
    }

    /// Fetch a single page of stargazers (1-based).
    async fn stargazers_page(&self, name: &str, page: u32) -> Result<Vec<Stargazer>, GitHubError> {
        let url = format!("{}/repos/{}/stargazers", self.base_url, name);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, STAR_MEDIA_TYPE)
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .send()
            .await?;

        let response = check_response(name, response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl StarSource for GitHubClient {
    async fn repo_details(&self, name: &str) -> Result<RepoDetails, GitHubError> {
        let url = format!("{}/repos/{}", self.base_url, name);
        let response = self.client.get(&url).send().await?;

        let response = check_response(name, response).await?;
        Ok(response.json().await?)
    }

    async fn stargazers(&self, repo: &RepoDetails) -> Result<Vec<Stargazer>, GitHubError> {
        let pages = page_count(repo.stargazers_count, self.max_pages);
        if pages == 0 {
            return Ok(Vec::new());
        }

        tracing::debug!(repo = %repo.full_name, pages, "fetching stargazers");

        // Dropping the set aborts pages still in flight.
        let mut results: Vec<Option<Vec<Stargazer>>> = vec![None; pages as usize];
        let mut set = JoinSet::new();
        let mut next = 1;

        while next <= pages || !set.is_empty() {
            while next <= pages && set.len() < self.page_concurrency {
                let client = self.clone();
                let name = repo.full_name.clone();
                let page = next;
                set.spawn(async move { (page, client.stargazers_page(&name, page).await) });
                next += 1;
            }

            if let Some(joined) = set.join_next().await {
                let (page, result) =
                    joined.map_err(|e| GitHubError::Other(format!("stargazer page task failed: {}", e)))?;
                results[(page - 1) as usize] = Some(result?);
            }
        }

        Ok(results.into_iter().flatten().flatten().collect())
    }
}

/// Number of stargazer pages to request, capped at `max_pages`.
fn page_count(stargazers: u64, max_pages: u32) -> u32 {
    let pages = stargazers.div_ceil(PER_PAGE as u64);
    pages.min(max_pages as u64) as u32
}

/// Check response status and convert errors.
async fn check_response(name: &str, response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let header = |key: &str| {
        response
            .headers()
            .get(key)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let remaining = header("x-ratelimit-remaining");
    let reset = header("x-ratelimit-reset");

    match status {
        StatusCode::NOT_FOUND => Err(GitHubError::NotFound(name.to_string())),
        StatusCode::UNAUTHORIZED => Err(GitHubError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(rate_limited(reset.as_deref())),
        StatusCode::FORBIDDEN if remaining.as_deref() == Some("0") => {
            Err(rate_limited(reset.as_deref()))
        }
        status => Err(GitHubError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

fn rate_limited(reset: Option<&str>) -> GitHubError {
    let reset_at = reset
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    GitHubError::RateLimited { reset_at }
}
