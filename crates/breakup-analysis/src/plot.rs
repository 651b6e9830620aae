//! Renderer-independent plot descriptions
//!
//! A [`Plot`] carries everything a presentation layer needs to draw a figure:
//! title, axis labels and scales, and one `(x, y)` series per overlaid data
//! set. Drawing itself happens elsewhere; plots serialize to JSON.

use breakup_stats::binning::AxisScale;
use serde::Serialize;

/// How the series of a plot are meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    /// Bars starting at each `x` (a lower bin edge)
    Histogram,
    /// Connected points
    Line,
    /// Unconnected points
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    /// # Panics
    ///
    /// Panics if `x` and `y` differ in length.
    #[must_use]
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "series coordinates must have equal length");
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub kind: PlotKind,
    /// Full bin edges (one more than the bins) for histogram plots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<f64>>,
    /// Fixed `(min, max)` of the x-axis, autoscaled when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<Series>,
}
