use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository metadata needed to page through its stargazers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDetails {
    pub full_name: String,
    pub stargazers_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One star event. Only the timestamp is used for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    pub starred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repo_details() {
        let json = r#"{
            "id": 1,
            "full_name": "caarlos0/starcharts",
            "stargazers_count": 1234,
            "created_at": "2016-08-05T14:39:53Z",
            "description": null,
            "private": false
        }"#;
        let details: RepoDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.full_name, "caarlos0/starcharts");
        assert_eq!(details.stargazers_count, 1234);
        assert!(details.description.is_none());
    }

    #[test]
    fn test_deserialize_star_page() {
        let json = r#"[
            {"starred_at": "2017-01-01T00:00:00Z", "user": {"login": "a"}},
            {"starred_at": "2017-01-02T12:30:00Z", "user": {"login": "b"}}
        ]"#;
        let stars: Vec<Stargazer> = serde_json::from_str(json).unwrap();
        assert_eq!(stars.len(), 2);
        assert!(stars[0].starred_at < stars[1].starred_at);
    }
}
