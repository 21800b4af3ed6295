//! Chart request parameters.
//!
//! Parses owner/repo from the path and the rendering options from the query
//! string into a canonical `ChartParameters`, and derives the cache key from
//! it. Only owner and repo can fail validation; every rendering option falls
//! back to a default instead.
//!
//! Any option that changes the rendered image must take part in
//! `ChartParameters::cache_key`, or two different charts share an entry.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

/// Bumped whenever the rendered output changes for the same parameters.
const CACHE_KEY_VERSION: &str = "v1";

/// Visual theme bundle applied to a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Light,
    Dark,
    Adaptive,
}

impl Variant {
    /// Unknown or missing values resolve to the default variant.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("light") => Variant::Light,
            Some("dark") => Variant::Dark,
            Some("adaptive") => Variant::Adaptive,
            _ => Variant::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Light => "light",
            Variant::Dark => "dark",
            Variant::Adaptive => "adaptive",
        }
    }
}

/// Raw query string of a chart request.
#[derive(Debug, Default)]
pub struct ChartQuery {
    pub variant: Option<String>,
    pub background: Option<String>,
    pub line: Option<String>,
    pub axis: Option<String>,
}

impl ChartQuery {
    /// Builds the query from decoded `key=value` pairs. The first value of a
    /// repeated key wins and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "variant" => &mut query.variant,
                "background" => &mut query.background,
                "line" => &mut query.line,
                "axis" => &mut query.axis,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartParameters {
    pub owner: String,
    pub repo: String,
    pub variant: Variant,
    /// `None` means the variant's own color.
    pub background: Option<String>,
    pub line: Option<String>,
    pub axis: Option<String>,
}

impl ChartParameters {
    pub fn extract(owner: &str, repo: &str, query: &ChartQuery) -> Result<Self> {
        Ok(Self {
            owner: validate_identifier("owner", owner)?,
            repo: validate_identifier("repo", repo)?,
            variant: Variant::parse_or_default(query.variant.as_deref()),
            background: normalize_color(query.background.as_deref()),
            line: normalize_color(query.line.as_deref()),
            axis: normalize_color(query.axis.as_deref()),
        })
    }

    /// `owner/repo`, as the GitHub API names it.
    pub fn name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn cache_key(&self) -> CacheKey {
        // GitHub resolves owner and repo case-insensitively.
        let owner = self.owner.to_ascii_lowercase();
        let repo = self.repo.to_ascii_lowercase();
        let fields: [&str; 7] = [
            CACHE_KEY_VERSION,
            &owner,
            &repo,
            self.variant.as_str(),
            self.background.as_deref().unwrap_or(""),
            self.line.as_deref().unwrap_or(""),
            self.axis.as_deref().unwrap_or(""),
        ];

        let mut hasher = Sha256::new();
        hasher.update(fields.join("\n").as_bytes());
        CacheKey(format!("chart:{:x}", hasher.finalize()))
    }
}

/// Deterministic cache key of a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_identifier(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidParams(format!("{} is required", field)));
    }

    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !safe || value == "." || value == ".." {
        return Err(AppError::InvalidParams(format!(
            "{} contains invalid characters: {}",
            field, value
        )));
    }

    Ok(value.to_string())
}

/// Bare hex colors gain a `#`; anything that could escape an SVG attribute or
/// CSS declaration is dropped back to the theme default.
fn normalize_color(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let unsafe_char = value
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '&' | ';' | '{' | '}'));
    if unsafe_char {
        tracing::debug!("ignoring unsafe color value: {:?}", value);
        return None;
    }

    let is_bare_hex = matches!(value.len(), 3 | 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit());
    if is_bare_hex {
        Some(format!("#{}", value))
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: ChartQuery) -> ChartParameters {
        ChartParameters::extract("caarlos0", "starcharts", &query).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let p = params(ChartQuery::default());
        assert_eq!(p.variant, Variant::Light);
        assert!(p.background.is_none());
        assert!(p.line.is_none());
        assert!(p.axis.is_none());
        assert_eq!(p.name(), "caarlos0/starcharts");
    }

    #[test]
    fn test_unknown_variant_falls_back() {
        let p = params(ChartQuery {
            variant: Some("neon".into()),
            ..Default::default()
        });
        assert_eq!(p.variant, Variant::Light);

        let p = params(ChartQuery {
            variant: Some("Dark".into()),
            ..Default::default()
        });
        assert_eq!(p.variant, Variant::Dark);
    }

    #[test]
    fn test_query_pairs_keep_first_value() {
        let pairs = [
            ("variant", "dark"),
            ("variant", "light"),
            ("line", "ff0000"),
            ("utm_source", "readme"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let query = ChartQuery::from_pairs(pairs);
        assert_eq!(query.variant.as_deref(), Some("dark"));
        assert_eq!(query.line.as_deref(), Some("ff0000"));
        assert!(query.background.is_none());
        assert!(query.axis.is_none());
        assert_eq!(params(query).variant, Variant::Dark);
    }

    #[test]
    fn test_empty_owner_or_repo_rejected() {
        let query = ChartQuery::default();
        assert!(matches!(
            ChartParameters::extract("", "starcharts", &query),
            Err(AppError::InvalidParams(_))
        ));
        assert!(matches!(
            ChartParameters::extract("caarlos0", "  ", &query),
            Err(AppError::InvalidParams(_))
        ));
        assert!(matches!(
            ChartParameters::extract("caarlos0", "..", &query),
            Err(AppError::InvalidParams(_))
        ));
        assert!(matches!(
            ChartParameters::extract("caar/los0", "starcharts", &query),
            Err(AppError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_color_normalization() {
        assert_eq!(normalize_color(Some("ff0000")), Some("#ff0000".into()));
        assert_eq!(normalize_color(Some("#ABC")), Some("#ABC".into()));
        assert_eq!(normalize_color(Some("red")), Some("red".into()));
        assert_eq!(
            normalize_color(Some("rgb(1, 2, 3)")),
            Some("rgb(1, 2, 3)".into())
        );
        assert_eq!(normalize_color(Some("")), None);
        assert_eq!(normalize_color(Some("red\" onload=\"x")), None);
        assert_eq!(normalize_color(Some("red;fill:blue")), None);
        assert_eq!(normalize_color(None), None);
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let query = || ChartQuery {
            variant: Some("dark".into()),
            background: Some("000".into()),
            line: Some("#ff0".into()),
            axis: Some("white".into()),
        };
        assert_eq!(params(query()).cache_key(), params(query()).cache_key());
        assert!(params(query()).cache_key().as_str().starts_with("chart:"));
    }

    #[test]
    fn test_cache_key_changes_with_every_visual_field() {
        let base = params(ChartQuery::default());
        let mut variants = vec![base.clone()];

        let mut p = base.clone();
        p.variant = Variant::Dark;
        variants.push(p);
        let mut p = base.clone();
        p.variant = Variant::Adaptive;
        variants.push(p);
        let mut p = base.clone();
        p.background = Some("#000".into());
        variants.push(p);
        let mut p = base.clone();
        p.line = Some("#000".into());
        variants.push(p);
        let mut p = base.clone();
        p.axis = Some("#000".into());
        variants.push(p);
        let mut p = base.clone();
        p.repo = "goreleaser".into();
        variants.push(p);

        let keys: std::collections::HashSet<_> = variants.iter().map(|p| p.cache_key()).collect();
        assert_eq!(keys.len(), variants.len());
    }

    #[test]
    fn test_cache_key_ignores_owner_case() {
        let lower = ChartParameters::extract("caarlos0", "starcharts", &ChartQuery::default()).unwrap();
        let upper = ChartParameters::extract("Caarlos0", "StarCharts", &ChartQuery::default()).unwrap();
        assert_eq!(lower.cache_key(), upper.cache_key());
    }
}
