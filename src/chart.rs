//! Bar charts with symmetric error bars
//!
//! Rendering is split into a pure layout pass ([`ChartDataset::layout`])
//! and an SVG drawing pass built on [`plotters`]. The SVG backend needs no
//! system fonts, so charts render the same on CI as on a workstation.

use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Output size in pixels
pub const CHART_SIZE: (u32, u32) = (800, 600);

/// Bar fill (sky blue)
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Half width of the whisker caps, in x-axis units
const CAP_HALF_WIDTH: f64 = 0.08;

/// One category of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Symmetric error magnitude (whisker spans `value ± error`)
    pub error: f64,
}

fn default_bar_width() -> f64 {
    0.6
}

/// Labels, heights and error magnitudes of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub title: String,
    #[serde(default)]
    pub y_label: String,
    /// Bar width as a fraction of the category slot (0, 1]
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    #[serde(default, rename = "bar")]
    pub bars: Vec<Bar>,
}

/// Geometry of one bar in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub label: String,
    /// Category slot center on the x axis (0, 1, 2, ...)
    pub center: f64,
    pub left: f64,
    pub right: f64,
    /// Height of the bar
    pub value: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

impl ChartDataset {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            bar_width: default_bar_width(),
            bars: Vec::new(),
        }
    }

    pub fn bar(mut self, label: impl Into<String>, value: f64, error: f64) -> Self {
        self.bars.push(Bar {
            label: label.into(),
            value,
            error,
        });
        self
    }

    /// Build a dataset from parallel label/value/error sequences
    pub fn from_parallel(
        title: impl Into<String>,
        y_label: impl Into<String>,
        labels: &[&str],
        values: &[f64],
        errors: &[f64],
    ) -> Result<Self> {
        if labels.len() != values.len() || labels.len() != errors.len() {
            return Err(ChartError::InvalidData(format!(
                "labels ({}), values ({}) and errors ({}) must have the same length",
                labels.len(),
                values.len(),
                errors.len()
            )));
        }

        let mut dataset = Self::new(title, y_label);
        for ((label, value), error) in labels.iter().zip(values).zip(errors) {
            dataset = dataset.bar(*label, *value, *error);
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.bars.is_empty() {
            return Err(ChartError::InvalidData(
                "chart needs at least one bar".to_string(),
            ));
        }
        if !(self.bar_width > 0.0 && self.bar_width <= 1.0) {
            return Err(ChartError::InvalidData(format!(
                "bar width {} is outside (0, 1]",
                self.bar_width
            )));
        }
        for bar in &self.bars {
            if !bar.value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar '{}' has a non-finite value",
                    bar.label
                )));
            }
            if !bar.error.is_finite() || bar.error < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "bar '{}' has invalid error {}",
                    bar.label, bar.error
                )));
            }
        }
        Ok(())
    }

    /// Place one bar per category, centered on integer x positions
    pub fn layout(&self) -> Result<Vec<BarGeometry>> {
        self.validate()?;
        let half = self.bar_width / 2.0;

        Ok(self
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let center = i as f64;
                BarGeometry {
                    label: bar.label.clone(),
                    center,
                    left: center - half,
                    right: center + half,
                    value: bar.value,
                    whisker_low: bar.value - bar.error,
                    whisker_high: bar.value + bar.error,
                }
            })
            .collect())
    }

    /// Y range covering every bar and whisker, always including zero,
    /// with 10% headroom
    pub fn y_range(&self) -> Result<(f64, f64)> {
        let geometry = self.layout()?;
        let low = geometry
            .iter()
            .map(|g| g.whisker_low.min(g.value))
            .fold(0.0, f64::min);
        let high = geometry
            .iter()
            .map(|g| g.whisker_high.max(g.value))
            .fold(0.0, f64::max);

        let span = (high - low).max(1.0);
        let low = if low < 0.0 { low - span * 0.1 } else { 0.0 };
        Ok((low, high + span * 0.1))
    }
}

/// Render the chart to an SVG document
pub fn render_svg(dataset: &ChartDataset) -> Result<String> {
    let geometry = dataset.layout()?;
    let (y_min, y_max) = dataset.y_range()?;
    let labels: Vec<&str> = geometry.iter().map(|g| g.label.as_str()).collect();
    let x_max = geometry.len() as f64 - 0.5;

    debug!(
        bars = geometry.len(),
        y_min,
        y_max,
        "rendering bar chart"
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&dataset.title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..x_max, y_min..y_max)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        let label_at = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).copied().unwrap_or("").to_string()
            } else {
                String::new()
            }
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len() + 1)
            .x_label_formatter(&label_at)
            .y_desc(dataset.y_label.as_str())
            .label_style(("sans-serif", 18))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        let base = 0.0f64.clamp(y_min, y_max);

        chart
            .draw_series(geometry.iter().map(|g| {
                Rectangle::new([(g.left, base), (g.right, g.value)], BAR_COLOR.filled())
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        // Bar outlines
        chart
            .draw_series(geometry.iter().map(|g| {
                Rectangle::new([(g.left, base), (g.right, g.value)], BLACK.stroke_width(1))
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(geometry.iter().map(|g| {
                PathElement::new(
                    vec![(g.center, g.whisker_low), (g.center, g.whisker_high)],
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(geometry.iter().flat_map(|g| {
                [g.whisker_low, g.whisker_high].map(|y| {
                    PathElement::new(
                        vec![(g.center - CAP_HALF_WIDTH, y), (g.center + CAP_HALF_WIDTH, y)],
                        BLACK.stroke_width(1),
                    )
                })
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    Ok(svg)
}

/// Render the chart and write it to `output_path`
pub fn write_svg(dataset: &ChartDataset, output_path: &Path) -> Result<()> {
    let svg = render_svg(dataset)?;
    std::fs::write(output_path, svg)?;
    info!(path = %output_path.display(), bars = dataset.len(), "chart written");
    Ok(())
}
