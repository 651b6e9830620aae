//! Runtime measurements of breakup implementations
//!
//! A [`TimingDataset`] holds wall-clock measurements of several implementation
//! approaches, taken at fixed minimal characteristic lengths. Each length
//! produces a known number of fragments, so the dataset plots as runtime over
//! fragment count.

use breakup_stats::{binning::AxisScale, descriptive::DescriptiveStats};
use serde::{Deserialize, Serialize};

use crate::plot::{Plot, PlotKind, Series};

/// Measurements at one minimal characteristic length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Minimal characteristic length of the run in m.
    pub characteristic_length: f64,
    /// Number of fragments the run produces.
    pub fragment_count: u64,
    /// Individual measurements in ms.
    #[serde(default)]
    pub times_ms: Vec<f64>,
}

impl TimingPoint {
    /// Mean of the measurements, or `None` if nothing was measured.
    #[must_use]
    pub fn average_ms(&self) -> Option<f64> {
        DescriptiveStats::new(self.times_ms.iter().copied()).map(|stats| stats.mean)
    }
}

/// Measurements of one implementation approach (e.g. `SoA parallel`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSeries {
    pub approach: String,
    pub points: Vec<TimingPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingDataset {
    pub title: String,
    pub approaches: Vec<TimingSeries>,
}

impl TimingDataset {
    /// Average runtime over fragment count, on log/log axes.
    ///
    /// Points without measurements are left out, and so are approaches
    /// without any measured point.
    ///
    /// # Examples
    ///
    /// ```
    /// use breakup_analysis::benchmark::{TimingDataset, TimingPoint, TimingSeries};
    ///
    /// let dataset = TimingDataset {
    ///     title: "Milestones".to_owned(),
    ///     approaches: vec![TimingSeries {
    ///         approach: "SoA parallel".to_owned(),
    ///         points: vec![
    ///             TimingPoint { characteristic_length: 1.0, fragment_count: 23, times_ms: vec![4.0, 6.0] },
    ///             TimingPoint { characteristic_length: 0.1, fragment_count: 1208, times_ms: vec![] },
    ///         ],
    ///     }],
    /// };
    /// let plot = dataset.to_plot();
    /// assert_eq!(plot.series[0].x, vec![23.0]);
    /// assert_eq!(plot.series[0].y, vec![5.0]);
    /// ```
    #[must_use]
    pub fn to_plot(&self) -> Plot {
        let series = self
            .approaches
            .iter()
            .filter_map(|approach| {
                #[expect(clippy::cast_precision_loss)]
                let (x, y): (Vec<f64>, Vec<f64>) = approach
                    .points
                    .iter()
                    .filter_map(|point| Some((point.fragment_count as f64, point.average_ms()?)))
                    .unzip();
                if x.is_empty() {
                    tracing::debug!(approach = %approach.approach, "no measurements, skipped");
                    return None;
                }
                Some(Series::new(approach.approach.clone(), x, y))
            })
            .collect();

        Plot {
            title: self.title.clone(),
            x_label: "Fragment Count".to_owned(),
            y_label: "Time in [ms]".to_owned(),
            x_scale: AxisScale::Log,
            y_scale: AxisScale::Log,
            kind: PlotKind::Line,
            edges: None,
            x_range: None,
            y_range: None,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "title": "Milestones",
        "approaches": [
            { "approach": "AoS", "points": [ { "characteristic_length": 1.0, "fragment_count": 23 } ] },
            {
                "approach": "SoA parallel",
                "points": [
                    { "characteristic_length": 1.0, "fragment_count": 23, "times_ms": [4.0, 6.0, 5.0] },
                    { "characteristic_length": 0.01, "fragment_count": 61997, "times_ms": [] },
                    { "characteristic_length": 0.001, "fragment_count": 3179589, "times_ms": [235.0, 245.0] }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_average() {
        let dataset: TimingDataset = serde_json::from_str(DATASET).unwrap();
        let points = &dataset.approaches[1].points;
        assert_eq!(points[0].average_ms(), Some(5.0));
        assert_eq!(points[1].average_ms(), None);
        assert_eq!(points[2].average_ms(), Some(240.0));
    }

    #[test]
    fn test_plot_skips_unmeasured() {
        let dataset: TimingDataset = serde_json::from_str(DATASET).unwrap();
        let plot = dataset.to_plot();
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].label, "SoA parallel");
        assert_eq!(plot.series[0].x, vec![23.0, 3_179_589.0]);
        assert_eq!(plot.series[0].y, vec![5.0, 240.0]);
        assert_eq!((plot.x_scale, plot.y_scale), (AxisScale::Log, AxisScale::Log));
    }

    #[test]
    fn test_milestone_dataset() {
        let dataset: TimingDataset =
            serde_json::from_str(include_str!("../../../data/timings_milestones.json")).unwrap();
        assert_eq!(dataset.approaches.len(), 3);
        let plot = dataset.to_plot();
        // only the parallel SoA approach has measurements
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].len(), 8);
        assert!(plot.series[0].y.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
