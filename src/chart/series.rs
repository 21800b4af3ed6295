use chrono::{DateTime, Utc};

use crate::models::Stargazer;

/// Plot-ready cumulative star counts.
///
/// Always holds at least two points: the line renderer needs a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x_values: Vec<DateTime<Utc>>,
    pub y_values: Vec<f64>,
    /// Points appended by the sparse-data safeguard, never stored anywhere.
    pub synthetic: usize,
}

impl Series {
    pub fn from_stargazers(stars: &[Stargazer]) -> Self {
        Self::from_stargazers_at(stars, Utc::now())
    }

    /// Build the series, padding sparse input with `(now, 1)` points.
    pub fn from_stargazers_at(stars: &[Stargazer], now: DateTime<Utc>) -> Self {
        let mut x_values = Vec::with_capacity(stars.len().max(2));
        let mut y_values = Vec::with_capacity(stars.len().max(2));

        for (i, star) in stars.iter().enumerate() {
            x_values.push(star.starred_at);
            y_values.push((i + 1) as f64);
        }

        let mut synthetic = 0;
        while x_values.len() < 2 {
            x_values.push(now);
            y_values.push(1.0);
            synthetic += 1;
        }

        Self {
            x_values,
            y_values,
            synthetic,
        }
    }

    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    pub fn points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.x_values.iter().copied().zip(self.y_values.iter().copied())
    }
}
