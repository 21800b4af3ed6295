//! SVG rendering of star charts and of the inline error image.
//!
//! Rendering is pure: the output goes to the provided writer and nothing else.

use std::fmt::{self, Write};

use chrono::{DateTime, Duration, Utc};

use crate::models::Variant;

use super::series::Series;
use super::styles::stylesheet;
use super::svg::{self, Element};

pub const CHART_WIDTH: u32 = 1024;
pub const CHART_HEIGHT: u32 = 400;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 60.0;
const X_TICKS: usize = 6;
const Y_TICKS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Axis {
    pub name: &'static str,
    pub color: Option<String>,
    pub stroke_width: f64,
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub width: u32,
    pub height: u32,
    pub variant: Variant,
    pub background: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Series,
    pub line_color: Option<String>,
    pub stroke_width: f64,
}

impl Chart {
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        let width = self.width as f64;
        let height = self.height as f64;
        let plot = Plot {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: width - MARGIN_LEFT - MARGIN_RIGHT,
            height: height - MARGIN_TOP - MARGIN_BOTTOM,
        };

        let (x_min, x_max) = self.x_domain();
        let (y_max, y_step) = y_domain(&self.series);
        let span = (x_max - x_min).num_milliseconds().max(1) as f64;
        let scale_x = |t: DateTime<Utc>| {
            plot.left + (t - x_min).num_milliseconds() as f64 / span * plot.width
        };
        let scale_y = |v: f64| plot.top + plot.height - v / y_max * plot.height;

        let mut doc = svg::document(self.width, self.height)
            .child(Element::new("style").raw(stylesheet(self.variant)))
            .child(
                Element::new("rect")
                    .attr("class", "background")
                    .attr("width", self.width)
                    .attr("height", self.height)
                    .attr_opt("style", self.background.as_ref().map(|c| format!("fill:{}", c))),
            );

        let axis_stroke = |axis: &Axis| {
            let mut style = format!("stroke-width:{}", svg::num(axis.stroke_width));
            if let Some(color) = &axis.color {
                style.push_str(&format!(";stroke:{}", color));
            }
            style
        };
        let text_fill = |axis: &Axis| axis.color.as_ref().map(|c| format!("fill:{}", c));

        // Horizontal grid and y ticks.
        let mut y_ticks = Element::new("g");
        let mut value = 0.0;
        while value <= y_max + f64::EPSILON {
            let y = scale_y(value);
            y_ticks.push(
                Element::new("line")
                    .attr("class", "grid")
                    .attr("x1", svg::num(plot.left))
                    .attr("x2", svg::num(plot.left + plot.width))
                    .attr("y1", svg::num(y))
                    .attr("y2", svg::num(y)),
            );
            y_ticks.push(
                Element::new("text")
                    .attr("class", "tick")
                    .attr("x", svg::num(plot.left - 8.0))
                    .attr("y", svg::num(y + 4.0))
                    .attr("text-anchor", "end")
                    .attr_opt("style", text_fill(&self.y_axis))
                    .text(format_count(value)),
            );
            value += y_step;
        }
        doc.push(y_ticks);

        let mut x_ticks = Element::new("g");
        for i in 0..X_TICKS {
            let t = x_min + (x_max - x_min) * i as i32 / (X_TICKS - 1) as i32;
            x_ticks.push(
                Element::new("text")
                    .attr("class", "tick")
                    .attr("x", svg::num(scale_x(t)))
                    .attr("y", svg::num(plot.top + plot.height + 18.0))
                    .attr("text-anchor", "middle")
                    .attr_opt("style", text_fill(&self.x_axis))
                    .text(t.format("%Y-%m-%d").to_string()),
            );
        }
        doc.push(x_ticks);

        // Axes.
        let bottom = plot.top + plot.height;
        doc.push(
            Element::new("line")
                .attr("class", "axis")
                .attr("x1", svg::num(plot.left))
                .attr("x2", svg::num(plot.left + plot.width))
                .attr("y1", svg::num(bottom))
                .attr("y2", svg::num(bottom))
                .attr("style", axis_stroke(&self.x_axis)),
        );
        doc.push(
            Element::new("line")
                .attr("class", "axis")
                .attr("x1", svg::num(plot.left))
                .attr("x2", svg::num(plot.left))
                .attr("y1", svg::num(plot.top))
                .attr("y2", svg::num(bottom))
                .attr("style", axis_stroke(&self.y_axis)),
        );
        doc.push(
            Element::new("text")
                .attr("class", "axis-label")
                .attr("x", svg::num(plot.left + plot.width / 2.0))
                .attr("y", svg::num(height - 12.0))
                .attr("text-anchor", "middle")
                .attr_opt("style", text_fill(&self.x_axis))
                .text(self.x_axis.name),
        );
        let y_label_x = 18.0;
        let y_label_y = plot.top + plot.height / 2.0;
        doc.push(
            Element::new("text")
                .attr("class", "axis-label")
                .attr("x", svg::num(y_label_x))
                .attr("y", svg::num(y_label_y))
                .attr("text-anchor", "middle")
                .attr(
                    "transform",
                    format!("rotate(-90 {} {})", svg::num(y_label_x), svg::num(y_label_y)),
                )
                .attr_opt("style", text_fill(&self.y_axis))
                .text(self.y_axis.name),
        );

        // Data line.
        let mut d = String::new();
        for (i, (x, y)) in self.series.points().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            write!(d, "{}{},{}", cmd, svg::num(scale_x(x)), svg::num(scale_y(y)))?;
        }
        let mut line_style = format!("stroke-width:{}", svg::num(self.stroke_width));
        if let Some(color) = &self.line_color {
            line_style.push_str(&format!(";stroke:{}", color));
        }
        doc.push(
            Element::new("path")
                .attr("class", "series")
                .attr("data-points", self.series.len())
                .attr("d", d)
                .attr("style", line_style),
        );

        doc.render(out)
    }

    /// Time range covered by the series. A zero-width range is widened by a
    /// day on the left so the line still spans the plot.
    fn x_domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let min = self.series.x_values.iter().min().copied().unwrap_or_else(Utc::now);
        let max = self.series.x_values.iter().max().copied().unwrap_or(min);
        if max <= min {
            (max - Duration::days(1), max)
        } else {
            (min, max)
        }
    }
}

struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

/// Upper bound and tick step of the y axis, in whole stars.
fn y_domain(series: &Series) -> (f64, f64) {
    let max = series.y_values.iter().copied().fold(1.0_f64, f64::max);
    let step = nice_step(max / Y_TICKS).max(1.0);
    ((max / step).ceil() * step, step)
}

fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_count(value: f64) -> String {
    let value = value.round() as u64;
    if value >= 10_000 {
        format!("{}k", svg::num(value as f64 / 1000.0))
    } else {
        value.to_string()
    }
}

/// Canvas-sized image showing `message` in red, centered.
pub fn render_error<W: Write>(out: &mut W, width: u32, height: u32, message: &str) -> fmt::Result {
    svg::document(width, height)
        .child(
            Element::new("text")
                .attr("fill", "red")
                .attr("x", width / 2)
                .attr("y", height / 2)
                .attr("text-anchor", "middle")
                .attr("dominant-baseline", "middle")
                .text(message),
        )
        .render(out)
}
