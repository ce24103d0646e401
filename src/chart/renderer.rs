//! Renders one series as a self-contained SVG line chart.
//!
//! Elements are emitted back to front: adverse shading, threshold line, horizontal
//! gridlines, vertical gridlines with tick labels, the event marker, the filled
//! area, the data line and finally the dots.

use crate::chart::adverse::adverse_runs;
use crate::chart::chart_spec::{ChartMode, ChartSize, ChartSpec, Margins};
use crate::chart::scale::YScale;
use crate::chart::svg::{escape_text, format_value};
use crate::types::hourly_point::HourlyPoint;
use chrono::{DateTime, Utc};
use log::warn;
use std::fmt::{self, Write};

const ADVERSE_FILL: &str = "rgba(255,193,7,0.12)";
const ADVERSE_STROKE: &str = "rgba(255,193,7,0.35)";
const THRESHOLD_STROKE: &str = "rgba(255,193,7,0.5)";
const THRESHOLD_TEXT: &str = "rgba(255,193,7,0.8)";
const GRID_STROKE: &str = "rgba(40,53,147,0.3)";
const INDEX_STROKE: &str = "rgba(200,200,200,0.12)";
const TICK_STROKE: &str = "rgba(40,53,147,0.2)";
const LABEL_FILL: &str = "#9fa8da";
const SECONDARY_LABEL_FILL: &str = "#7986cb";
const MARKER_STROKE: &str = "#f44336";
const ALERT_DOT: &str = "#ffc107";

const GRID_STEP: f64 = 5.0;
const MAX_GRIDLINES: usize = 50;

/// Output of [`render_chart`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedChart {
    /// The container has no area; nothing was drawn.
    Skipped,
    /// Placeholder SVG for a series without any value.
    NoData(String),
    Svg(String),
}

impl RenderedChart {
    /// The markup to embed, empty when skipped.
    pub fn markup(&self) -> &str {
        match self {
            RenderedChart::Skipped => "",
            RenderedChart::NoData(svg) | RenderedChart::Svg(svg) => svg,
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, RenderedChart::Svg(_))
    }
}

/// Position of `event` between the first and last hour as a fraction in `[0, 1]`,
/// or `None` when it falls outside that window.
pub fn event_marker_fraction(hours: &[HourlyPoint], event: DateTime<Utc>) -> Option<f64> {
    let first = hours.first()?.time;
    let last = hours.last()?.time;
    if event < first || event > last {
        return None;
    }
    let span = (last - first).num_milliseconds();
    if span == 0 {
        return Some(0.0);
    }
    Some((event - first).num_milliseconds() as f64 / span as f64)
}

struct Plot {
    margins: Margins,
    width: f64,
    height: f64,
    n: usize,
    scale: YScale,
}

impl Plot {
    fn plot_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    fn bottom(&self) -> f64 {
        self.height - self.margins.bottom
    }

    /// X of a possibly fractional index. A single point sits in the centre.
    fn x(&self, index: f64) -> f64 {
        if self.n <= 1 {
            return self.margins.left + self.plot_width() / 2.0;
        }
        self.margins.left + index / (self.n - 1) as f64 * self.plot_width()
    }

    fn y(&self, value: f64) -> f64 {
        self.margins.top + self.plot_height() * (1.0 - self.scale.fraction(value))
    }
}

fn no_data_svg(size: ChartSize) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.1} {h:.1}" preserveAspectRatio="none" style="width:100%;height:100%"><text x="{x:.1}" y="{y:.1}" text-anchor="middle" fill="{LABEL_FILL}" font-size="13">No data</text></svg>"#,
        w = size.width,
        h = size.height,
        x = size.width / 2.0,
        y = size.height / 2.0,
    )
}

/// Renders `spec` into a container of `size` pixels.
///
/// Identical inputs always produce byte-identical output.
pub fn render_chart(spec: &ChartSpec<'_>, size: ChartSize) -> RenderedChart {
    if size.is_degenerate() {
        return RenderedChart::Skipped;
    }
    let values = spec.clean_values();
    let Some(scale) = YScale::for_values(&values, spec.mode) else {
        return RenderedChart::NoData(no_data_svg(size));
    };

    let plot = Plot {
        margins: Margins::default(),
        width: size.width,
        height: size.height,
        n: values.len(),
        scale,
    };
    let mut svg = String::new();
    match write_chart(&mut svg, spec, &plot, &values) {
        Ok(()) => RenderedChart::Svg(svg),
        Err(e) => {
            warn!("Failed to format chart markup: {e}");
            RenderedChart::NoData(no_data_svg(size))
        }
    }
}

fn write_chart(
    svg: &mut String,
    spec: &ChartSpec<'_>,
    plot: &Plot,
    values: &[Option<f64>],
) -> fmt::Result {
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.1} {:.1}" preserveAspectRatio="none" style="width:100%;height:100%">"#,
        plot.width, plot.height,
    )?;
    if let Some(threshold) = spec.threshold.filter(|t| t.is_finite()) {
        write_threshold(svg, spec, plot, values, threshold)?;
    }
    write_gridlines(svg, plot, spec.mode)?;
    write_ticks(svg, spec, plot)?;
    write_event_marker(svg, spec, plot)?;
    write_series(svg, spec, plot, values)?;
    svg.push_str("</svg>");
    Ok(())
}

fn write_threshold(
    svg: &mut String,
    spec: &ChartSpec<'_>,
    plot: &Plot,
    values: &[Option<f64>],
    threshold: f64,
) -> fmt::Result {
    let ml = plot.margins.left;
    let mt = plot.margins.top;
    let last_index = plot.n.saturating_sub(1) as f64;
    for (start, end) in adverse_runs(values, threshold, spec.direction) {
        let (x1, x2) = if plot.n <= 1 {
            (ml, ml + plot.plot_width())
        } else {
            (
                plot.x((start as f64 - 0.5).max(0.0)),
                plot.x((end as f64 + 0.5).min(last_index)),
            )
        };
        write!(
            svg,
            r#"<rect x="{x1:.1}" y="{mt:.1}" width="{:.1}" height="{:.1}" fill="{ADVERSE_FILL}" stroke="{ADVERSE_STROKE}" stroke-width="1" stroke-dasharray="4,2"/>"#,
            x2 - x1,
            plot.plot_height(),
        )?;
    }

    if !plot.scale.contains(threshold) {
        return Ok(());
    }
    let y = plot.y(threshold);
    let right = plot.width - plot.margins.right;
    write!(
        svg,
        r#"<line x1="{ml:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{THRESHOLD_STROKE}" stroke-width="1" stroke-dasharray="6,3"/>"#
    )?;
    write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{THRESHOLD_TEXT}" font-size="11" font-weight="600">{}</text>"#,
        right - 2.0,
        y - 3.0,
        escape_text(&format_value(threshold)),
    )
}

fn write_gridlines(svg: &mut String, plot: &Plot, mode: ChartMode) -> fmt::Result {
    let scale = plot.scale;
    let label_x = plot.margins.left - 4.0;
    let right = plot.width - plot.margins.right;
    let mut gridline = |value: f64, labelled: bool| -> fmt::Result {
        let y = plot.y(value);
        write!(
            svg,
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{GRID_STROKE}" stroke-width="0.5"/>"#,
            plot.margins.left,
        )?;
        if labelled {
            write!(
                svg,
                r#"<text x="{label_x:.1}" y="{:.1}" text-anchor="end" fill="{LABEL_FILL}" font-size="13">{}</text>"#,
                y + 4.0,
                format_value(value.round()),
            )?;
        }
        Ok(())
    };

    match mode {
        ChartMode::Percentage => {
            for g in 1..=4 {
                gridline(scale.min + g as f64 / 4.0 * scale.range(), true)?;
            }
        }
        ChartMode::Natural => {
            // Every fifth unit, thinned out so a huge range stays readable.
            let steps = ((scale.max - scale.min) / GRID_STEP).round();
            let stride = (steps / MAX_GRIDLINES as f64).ceil().max(1.0);
            let count = (steps / stride).floor() as usize;
            for k in 0..=count.min(MAX_GRIDLINES) {
                gridline(scale.min + k as f64 * stride * GRID_STEP, k != 0)?;
            }
        }
    }
    Ok(())
}

fn write_ticks(svg: &mut String, spec: &ChartSpec<'_>, plot: &Plot) -> fmt::Result {
    let mt = plot.margins.top;
    let bottom = plot.bottom();
    for i in 0..plot.n {
        let x = plot.x(i as f64);
        write!(
            svg,
            r#"<line x1="{x:.1}" y1="{mt:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="{INDEX_STROKE}" stroke-width="0.5"/>"#
        )?;
    }
    for (i, label) in spec.labels.iter().enumerate().take(plot.n) {
        let Some(label) = label else { continue };
        let x = plot.x(i as f64);
        write!(
            svg,
            r#"<line x1="{x:.1}" y1="{mt:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="{TICK_STROKE}" stroke-width="1"/>"#
        )?;
        write!(
            svg,
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" fill="{LABEL_FILL}" font-size="13">{}</text>"#,
            bottom + 13.0,
            escape_text(&label.primary),
        )?;
        if let Some(secondary) = &label.secondary {
            write!(
                svg,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" fill="{SECONDARY_LABEL_FILL}" font-size="11">{}</text>"#,
                bottom + 24.0,
                escape_text(secondary),
            )?;
        }
    }
    Ok(())
}

fn write_event_marker(svg: &mut String, spec: &ChartSpec<'_>, plot: &Plot) -> fmt::Result {
    let Some(fraction) = spec
        .event_time
        .and_then(|event| event_marker_fraction(spec.hours, event))
    else {
        return Ok(());
    };
    let mt = plot.margins.top;
    let bottom = plot.bottom();
    let x = plot.x(fraction * plot.n.saturating_sub(1) as f64);
    write!(
        svg,
        r#"<line x1="{x:.1}" y1="{mt:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="{MARKER_STROKE}" stroke-width="3"/>"#
    )?;
    write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" fill="{MARKER_STROKE}" font-size="14" font-weight="700">{}</text>"#,
        x + 4.0,
        mt + 12.0,
        escape_text(spec.marker_label()),
    )
}

/// Filled area, data line and dots.
///
/// The area spans every present point from the first to the last one, bridging
/// gaps. The line is broken at gaps and skips isolated points.
fn write_series(
    svg: &mut String,
    spec: &ChartSpec<'_>,
    plot: &Plot,
    values: &[Option<f64>],
) -> fmt::Result {
    let bottom = plot.bottom();
    let color = escape_text(&spec.color);
    let runs = point_runs(plot, values);
    let points: Vec<(f64, f64)> = runs.iter().flatten().copied().collect();

    if let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) {
        if points.len() > 1 {
            svg.push_str(r#"<path d=""#);
            write_path_data(svg, &points)?;
            write!(
                svg,
                r#" L{last_x:.1},{bottom:.1} L{first_x:.1},{bottom:.1} Z" fill="{color}" fill-opacity="0.1" stroke="none"/>"#
            )?;
        }
    }

    let mut lines = runs.iter().filter(|run| run.len() > 1).peekable();
    if lines.peek().is_some() {
        svg.push_str(r#"<path d=""#);
        for (i, run) in lines.enumerate() {
            if i > 0 {
                svg.push(' ');
            }
            write_path_data(svg, run)?;
        }
        write!(
            svg,
            r#"" fill="none" stroke="{color}" stroke-width="2" stroke-linejoin="round" stroke-linecap="round"/>"#
        )?;
    }

    for (i, value) in values.iter().enumerate() {
        let Some(value) = value else { continue };
        let (fill, radius) = if spec.is_adverse(*value) {
            (ALERT_DOT, 3)
        } else {
            (color.as_str(), 2)
        };
        write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{radius}" fill="{fill}"/>"#,
            plot.x(i as f64),
            plot.y(*value),
        )?;
    }
    Ok(())
}

/// Splits the plotted points into runs of consecutive present values.
fn point_runs(plot: &Plot, values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((plot.x(i as f64), plot.y(*v))),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn write_path_data(out: &mut String, points: &[(f64, f64)]) -> fmt::Result {
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            write!(out, "M{x:.1},{y:.1}")?;
        } else {
            write!(out, " L{x:.1},{y:.1}")?;
        }
    }
    Ok(())
}
