//! Request and upstream data types.
//!
//! - `params`: ChartParameters, Variant, CacheKey and query extraction
//! - `repository`: RepoDetails and Stargazer as returned by the GitHub API

pub mod params;
pub mod repository;

pub use params::*;
pub use repository::*;
