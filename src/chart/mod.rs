//! Star chart generation.
//!
//! - `series`: stargazer timestamps to cumulative plot points
//! - `render`: SVG line chart and inline error image
//! - `styles`: per-variant stylesheets
//! - `svg`: element builder shared by the renderers
//! - `pipeline`: cache-aside flow tying cache, GitHub and renderer together

pub mod pipeline;
pub mod render;
pub mod series;
pub mod styles;
pub mod svg;

pub use pipeline::render_chart;
pub use render::{CHART_HEIGHT, CHART_WIDTH};
pub use series::Series;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Where a rendered image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the cache unchanged.
    Cache,
    /// Freshly rendered chart, now cached.
    Fresh,
    /// Error image for a failed star fetch. Never cached.
    Error,
}

#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub body: String,
    pub content_type: &'static str,
    pub source: ImageSource,
}

impl RenderedImage {
    pub fn svg(body: String, source: ImageSource) -> Self {
        Self {
            body,
            content_type: SVG_CONTENT_TYPE,
            source,
        }
    }
}
