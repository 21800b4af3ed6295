//! Stylesheets for the chart variants.
//!
//! The classes used by the renderer: `background`, `grid`, `axis`,
//! `axis-label`, `tick` and `series`.

use crate::models::Variant;

const BASE: &str = r#"
text { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; }
.axis-label { font-size: 14px; font-weight: 600; }
.tick { font-size: 11px; }
.series { fill: none; stroke-linejoin: round; stroke-linecap: round; }
.grid { stroke-width: 1; stroke-dasharray: 2 4; }
"#;

const LIGHT: &str = r#"
.background { fill: #ffffff; }
.grid { stroke: #e1e4e8; }
.axis { stroke: #24292f; }
.axis-label, .tick { fill: #24292f; }
.series { stroke: #6b63ff; }
"#;

const DARK: &str = r#"
.background { fill: #0d1117; }
.grid { stroke: #30363d; }
.axis { stroke: #c9d1d9; }
.axis-label, .tick { fill: #c9d1d9; }
.series { stroke: #58a6ff; }
"#;

pub fn stylesheet(variant: Variant) -> String {
    match variant {
        Variant::Light => format!("{}{}", BASE, LIGHT),
        Variant::Dark => format!("{}{}", BASE, DARK),
        Variant::Adaptive => format!(
            "{}{}@media (prefers-color-scheme: dark) {{{}}}",
            BASE, LIGHT, DARK
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_differ() {
        let light = stylesheet(Variant::Light);
        let dark = stylesheet(Variant::Dark);
        assert!(light.contains("#ffffff"));
        assert!(dark.contains("#0d1117"));
        assert!(!light.contains("prefers-color-scheme"));
    }

    #[test]
    fn test_adaptive_switches_on_color_scheme() {
        let adaptive = stylesheet(Variant::Adaptive);
        assert!(adaptive.contains("#ffffff"));
        assert!(adaptive.contains("@media (prefers-color-scheme: dark) {"));
        assert!(adaptive.contains("#0d1117"));
    }
}
