//! Process configuration.
//!
//! Every option can be passed as a flag or through the environment, so the
//! same binary runs unchanged locally and inside a container.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// Star history charts for GitHub repositories
#[derive(Debug, Clone, Parser)]
#[command(name = "starcharts")]
#[command(about = "Serves star history charts for GitHub repositories", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// GitHub token used for API requests (raises the rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Maximum number of stargazer pages fetched per repository
    #[arg(long, env = "GITHUB_MAX_PAGES", default_value_t = 400)]
    pub max_pages: u32,

    /// Maximum number of stargazer page requests in flight per chart
    #[arg(long, env = "GITHUB_PAGE_CONCURRENCY", default_value_t = 4)]
    pub page_concurrency: usize,

    /// How long a rendered chart is reused, in seconds
    #[arg(long, env = "CACHE_TTL", default_value_t = 86_400)]
    pub cache_ttl: u64,

    /// Maximum number of rendered charts kept in memory
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = 1024)]
    pub cache_capacity: usize,

    /// Deadline for a single request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 60)]
    pub request_timeout: u64,
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
