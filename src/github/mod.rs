//! Upstream star data.
//!
//! `StarSource` is the seam between the chart pipeline and GitHub: the real
//! `GitHubClient` implements it over the REST API and tests substitute fakes.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{RepoDetails, Stargazer};

pub use client::GitHubClient;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("GitHub rejected the token")]
    Unauthorized,

    #[error("rate limited by GitHub, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("{0}")]
    Other(String),
}

/// Source of repository details and their star history.
///
/// Dropping a returned future abandons the request.
#[async_trait]
pub trait StarSource: Send + Sync {
    /// Resolve `owner/repo`.
    async fn repo_details(&self, name: &str) -> Result<RepoDetails, GitHubError>;

    /// All star events of a repository, oldest first.
    async fn stargazers(&self, repo: &RepoDetails) -> Result<Vec<Stargazer>, GitHubError>;
}
