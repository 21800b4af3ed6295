//! Test doubles for the GitHub and cache seams.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::cache::{CacheError, ChartCache};
use crate::github::{GitHubError, StarSource};
use crate::models::{RepoDetails, Stargazer};

pub enum Stars {
    Ok(Vec<Stargazer>),
    Fail(&'static str),
    /// Answers with no stars once the delay has passed.
    Slow(Duration),
}

/// Scripted `StarSource`. Any repository named `missing` fails to resolve.
pub struct FakeGitHub {
    pub stars: Mutex<Stars>,
    pub details_calls: AtomicUsize,
    pub star_calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn new(stars: Stars) -> Self {
        Self {
            stars: Mutex::new(stars),
            details_calls: AtomicUsize::new(0),
            star_calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst) + self.star_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StarSource for FakeGitHub {
    async fn repo_details(&self, name: &str) -> Result<RepoDetails, GitHubError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if name.ends_with("/missing") {
            return Err(GitHubError::NotFound(name.to_string()));
        }
        Ok(RepoDetails {
            full_name: name.to_string(),
            stargazers_count: 3,
            created_at: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            description: Some("Plot your repository stars over time".to_string()),
        })
    }

    async fn stargazers(&self, _: &RepoDetails) -> Result<Vec<Stargazer>, GitHubError> {
        self.star_calls.fetch_add(1, Ordering::SeqCst);
        let delay = match &*self.stars.lock().unwrap() {
            Stars::Ok(stars) => return Ok(stars.clone()),
            Stars::Fail(msg) => return Err(GitHubError::Other(msg.to_string())),
            Stars::Slow(delay) => *delay,
        };
        tokio::time::sleep(delay).await;
        Ok(Vec::new())
    }
}

/// Cache whose reads and writes always fail.
pub struct BrokenCache;

#[async_trait]
impl ChartCache for BrokenCache {
    async fn get(&self, _: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("down".into()))
    }

    async fn put(&self, _: &str, _: String, _: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("down".into()))
    }
}

/// `n` daily star events starting 2020-01-01.
pub fn stars(n: u32) -> Vec<Stargazer> {
    (0..n)
        .map(|i| Stargazer {
            starred_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::days(i as i64),
        })
        .collect()
}
