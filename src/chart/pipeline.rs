//! Cache-aside chart pipeline.
//!
//! lookup → (miss) resolve repository → list stars → render → store.
//!
//! Only a complete chart is ever stored. A failed star listing still yields
//! an image, the error message drawn in red, but it bypasses the cache so an
//! upstream outage is not replayed for the whole TTL. Cache errors are logged
//! and otherwise ignored: a failed read is a miss, a failed write changes
//! nothing about the response.

use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::cache::ChartCache;
use crate::error::{AppError, Result};
use crate::github::StarSource;
use crate::models::ChartParameters;

use super::render::{Axis, Chart, render_error};
use super::{CHART_HEIGHT, CHART_WIDTH, ImageSource, RenderedImage, Series};

const STROKE_WIDTH: f64 = 2.0;

pub async fn render_chart(
    stars: &dyn StarSource,
    cache: &dyn ChartCache,
    ttl: Duration,
    params: &ChartParameters,
) -> Result<RenderedImage> {
    let span = tracing::info_span!("chart", repo = %params.name(), variant = params.variant.as_str());
    cache_aside(stars, cache, ttl, params).instrument(span).await
}

async fn cache_aside(
    stars: &dyn StarSource,
    cache: &dyn ChartCache,
    ttl: Duration,
    params: &ChartParameters,
) -> Result<RenderedImage> {
    let key = params.cache_key();
    let name = params.name();

    match cache.get(key.as_str()).await {
        Ok(Some(svg)) => {
            tracing::debug!("using cached chart");
            return Ok(RenderedImage::svg(svg, ImageSource::Cache));
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("cache read failed, treating as miss: {}", e),
    }

    let start = Instant::now();
    let repo = stars.repo_details(&name).await?;

    let stargazers = match stars.stargazers(&repo).await {
        Ok(stargazers) => stargazers,
        Err(e) => {
            tracing::error!("failed to get stars: {}", e);
            let mut body = String::new();
            render_error(&mut body, CHART_WIDTH, CHART_HEIGHT, &e.to_string())
                .map_err(|e| AppError::Internal(e.to_string()))?;
            return Ok(RenderedImage::svg(body, ImageSource::Error));
        }
    };
    tracing::debug!(stars = stargazers.len(), elapsed = ?start.elapsed(), "collect_stars");

    let start = Instant::now();
    let series = Series::from_stargazers(&stargazers);
    if series.synthetic > 0 {
        tracing::info!("not enough results, adding {} synthetic point(s)", series.synthetic);
    }

    let chart = Chart {
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        variant: params.variant,
        background: params.background.clone(),
        x_axis: Axis {
            name: "Time",
            color: params.axis.clone(),
            stroke_width: STROKE_WIDTH,
        },
        y_axis: Axis {
            name: "Stargazers",
            color: params.axis.clone(),
            stroke_width: STROKE_WIDTH,
        },
        series,
        line_color: params.line.clone(),
        stroke_width: STROKE_WIDTH,
    };

    let mut body = String::new();
    chart
        .render(&mut body)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::debug!(elapsed = ?start.elapsed(), "chart");

    if let Err(e) = cache.put(key.as_str(), body.clone(), ttl).await {
        tracing::error!("failed to cache chart: {}", e);
    }

    Ok(RenderedImage::svg(body, ImageSource::Fresh))
}
