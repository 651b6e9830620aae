//! Attribute distributions and the plots built from them
//!
//! Every distribution figure of a comparison is described by a
//! [`DistributionConfig`] (attribute, binning, count mode, transform, y-axis
//! scale and which implementations to overlay) and rendered by the single
//! [`render_distribution`] operation. Scatter figures of two attributes are
//! described by a [`ScatterConfig`] and rendered by [`render_scatter`].
//!
//! Plot sets are plain data: [`PlotSet::standard`] builds the usual comparison
//! suite, and any set can be loaded from JSON.
//!
//! ```json
//! {
//!   "plots": [
//!     {
//!       "plot": "distribution",
//!       "attribute": "area_to_mass_ratio",
//!       "binning": { "kind": "log_space", "lo": 0.001, "hi": 10.0, "num_bins": 49 },
//!       "count_mode": "relative",
//!       "transform": { "kind": "cumulative" }
//!     },
//!     { "plot": "scatter", "x": "characteristic_length", "y": "area_to_mass_ratio" }
//!   ]
//! }
//! ```

use breakup_stats::{
    binning::{AxisScale, Binning, BinningError},
    histogram::{CountMode, Histogram},
    survival::{DEFAULT_GRID_POINTS, SurvivalCurve, geometric_grid},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    attribute::{Attribute, IncompatibleAttributeError},
    plot::{Plot, PlotKind, Series},
    population::{FragmentPopulation, ImplementationRole},
};

/// Sorted attribute values of one population.
#[derive(Debug, Clone)]
pub struct EmpiricalDistribution {
    attribute: Attribute,
    label: String,
    sorted: Vec<f64>,
}

impl EmpiricalDistribution {
    pub fn new(
        population: &FragmentPopulation,
        attribute: Attribute,
    ) -> Result<Self, IncompatibleAttributeError> {
        let mut sorted = population.values(attribute)?;
        sorted.sort_by(f64::total_cmp);
        Ok(Self {
            attribute,
            label: population.label().to_owned(),
            sorted,
        })
    }

    #[must_use]
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Implementation label of the source population.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn sorted_values(&self) -> &[f64] {
        &self.sorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    #[must_use]
    pub fn histogram(&self, binning: Binning) -> Histogram {
        Histogram::new(self.sorted.iter().copied(), binning)
    }

    #[must_use]
    pub fn survival(&self, thresholds: &[f64]) -> SurvivalCurve {
        SurvivalCurve::from_sorted(&self.sorted, thresholds)
    }
}

/// Transform applied to per-bin counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// Plain per-bin counts
    #[default]
    None,
    /// Ascending running sum across bins
    Cumulative,
    /// Number of samples at or above each threshold of a geometric grid
    Survival {
        #[serde(default = "default_grid_points")]
        grid_points: usize,
    },
}

fn default_grid_points() -> usize {
    DEFAULT_GRID_POINTS
}

fn default_overlay() -> Vec<ImplementationRole> {
    vec![ImplementationRole::Reference, ImplementationRole::Candidate]
}

fn default_log_scale() -> AxisScale {
    AxisScale::Log
}

/// Description of one distribution figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub attribute: Attribute,
    /// Bin layout of histogram views. The threshold grid of survival views
    /// spans a log-space binning, and the range of interest otherwise.
    ///
    /// Defaults to 50 log-space bins over the attribute's range of interest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binning: Option<Binning>,
    #[serde(default)]
    pub count_mode: CountMode,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_log_scale")]
    pub y_scale: AxisScale,
    /// Implementations drawn on the figure, in drawing order.
    #[serde(default = "default_overlay")]
    pub overlay: Vec<ImplementationRole>,
}

impl DistributionConfig {
    /// Raw-count histogram with a log y-axis, overlaying both implementations.
    #[must_use]
    pub fn histogram(attribute: Attribute, binning: Binning) -> Self {
        Self {
            attribute,
            binning: Some(binning),
            count_mode: CountMode::Raw,
            transform: Transform::None,
            y_scale: AxisScale::Log,
            overlay: default_overlay(),
        }
    }

    /// Survival counts over the attribute's range of interest.
    #[must_use]
    pub fn survival(attribute: Attribute) -> Self {
        Self {
            attribute,
            binning: None,
            count_mode: CountMode::Raw,
            transform: Transform::Survival {
                grid_points: DEFAULT_GRID_POINTS,
            },
            y_scale: AxisScale::Log,
            overlay: default_overlay(),
        }
    }

    /// Effective bin layout of the figure.
    pub fn effective_binning(&self) -> Result<Binning, BinningError> {
        self.binning
            .map_or_else(|| default_binning(self.attribute), Ok)
    }

    /// File-name friendly identifier, e.g. `am_log_cumulative`.
    #[must_use]
    pub fn name(&self) -> String {
        let attribute = self.attribute.id();
        let scale = match self.binning.map_or(AxisScale::Log, |binning| binning.scale()) {
            AxisScale::Linear => "linear",
            AxisScale::Log => "log",
        };
        let relative = match self.count_mode {
            CountMode::Raw => "",
            CountMode::Relative => "_relative",
        };
        match self.transform {
            Transform::None => format!("{attribute}_{scale}{relative}"),
            Transform::Cumulative => format!("{attribute}_{scale}_cumulative{relative}"),
            Transform::Survival { .. } => format!("{attribute}_survival{relative}"),
        }
    }
}

/// 50 log-space bins over the attribute's range of interest.
fn default_binning(attribute: Attribute) -> Result<Binning, BinningError> {
    let (lo, hi) = attribute.range_of_interest();
    Binning::log_space(lo, hi, 50)
}

/// Description of a scatter figure of two attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub x: Attribute,
    pub y: Attribute,
    #[serde(default = "default_overlay")]
    pub overlay: Vec<ImplementationRole>,
    /// Fixed x-axis limits, autoscaled when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
}

impl ScatterConfig {
    #[must_use]
    pub fn new(x: Attribute, y: Attribute) -> Self {
        Self {
            x,
            y,
            overlay: default_overlay(),
            x_range: None,
            y_range: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        format!("scatter_{}_{}", self.x.id(), self.y.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plot", rename_all = "snake_case")]
pub enum PlotConfig {
    Distribution(DistributionConfig),
    Scatter(ScatterConfig),
}

impl PlotConfig {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Distribution(config) => config.name(),
            Self::Scatter(config) => config.name(),
        }
    }

    pub fn render(&self, populations: &[&FragmentPopulation]) -> Result<Plot, RenderError> {
        match self {
            Self::Distribution(config) => render_distribution(config, populations),
            Self::Scatter(config) => render_scatter(config, populations),
        }
    }
}

/// A list of figures rendered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSet {
    pub plots: Vec<PlotConfig>,
}

impl PlotSet {
    /// The usual comparison suite of a breakup scenario.
    ///
    /// # Examples
    ///
    /// ```
    /// use breakup_analysis::distribution::PlotSet;
    ///
    /// let set = PlotSet::standard().unwrap();
    /// let names = set.plots.iter().map(|plot| plot.name()).collect::<Vec<_>>();
    /// assert!(names.contains(&"lc_linear".to_owned()));
    /// assert!(names.contains(&"am_log_cumulative_relative".to_owned()));
    /// assert!(names.contains(&"scatter_dv_am".to_owned()));
    /// ```
    pub fn standard() -> Result<Self, BinningError> {
        // 100 equally spaced edges
        let linear = |lo, hi| Binning::linear(lo, hi, 99);

        let mut plots = vec![
            DistributionConfig::histogram(Attribute::CharacteristicLength, linear(0.0, 5.0)?),
            DistributionConfig::histogram(
                Attribute::CharacteristicLength,
                default_binning(Attribute::CharacteristicLength)?,
            ),
            DistributionConfig::histogram(Attribute::AreaToMassRatio, linear(0.0, 5.0)?),
            DistributionConfig::histogram(
                Attribute::AreaToMassRatio,
                default_binning(Attribute::AreaToMassRatio)?,
            ),
            DistributionConfig::histogram(Attribute::VelocityMagnitude, linear(0.0, 10_000.0)?),
            DistributionConfig {
                count_mode: CountMode::Relative,
                transform: Transform::Cumulative,
                y_scale: AxisScale::Linear,
                ..DistributionConfig::histogram(
                    Attribute::AreaToMassRatio,
                    Binning::log_space(0.001, 10.0, 49)?,
                )
            },
        ]
        .into_iter()
        .map(PlotConfig::Distribution)
        .collect::<Vec<_>>();

        plots.extend(
            Attribute::ALL
                .into_iter()
                .map(|attribute| PlotConfig::Distribution(DistributionConfig::survival(attribute))),
        );
        plots.push(PlotConfig::Scatter(ScatterConfig {
            x_range: Some((0.001, 10.0)),
            y_range: Some((0.001, 100.0)),
            ..ScatterConfig::new(Attribute::CharacteristicLength, Attribute::AreaToMassRatio)
        }));
        plots.push(PlotConfig::Scatter(ScatterConfig {
            y_range: Some((0.001, 100.0)),
            ..ScatterConfig::new(Attribute::VelocityMagnitude, Attribute::AreaToMassRatio)
        }));
        Ok(Self { plots })
    }

    /// Relative distributions of the reference population alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use breakup_analysis::distribution::PlotSet;
    ///
    /// let set = PlotSet::single_population().unwrap();
    /// let names = set.plots.iter().map(|plot| plot.name()).collect::<Vec<_>>();
    /// assert_eq!(
    ///     names,
    ///     [
    ///         "lc_linear_relative",
    ///         "lc_linear_cumulative_relative",
    ///         "am_log_relative",
    ///         "am_log_cumulative_relative",
    ///         "scatter_lc_am",
    ///     ]
    /// );
    /// ```
    pub fn single_population() -> Result<Self, BinningError> {
        let relative = |binning, transform| DistributionConfig {
            count_mode: CountMode::Relative,
            transform,
            y_scale: AxisScale::Linear,
            overlay: vec![ImplementationRole::Reference],
            ..DistributionConfig::histogram(Attribute::CharacteristicLength, binning)
        };
        let lc = Binning::linear(0.0, 10.0, 1000)?;
        let am = Binning::log_space(0.001, 10.0, 49)?;

        let mut plots = vec![
            relative(lc, Transform::None),
            relative(lc, Transform::Cumulative),
            DistributionConfig {
                attribute: Attribute::AreaToMassRatio,
                ..relative(am, Transform::None)
            },
            DistributionConfig {
                attribute: Attribute::AreaToMassRatio,
                ..relative(am, Transform::Cumulative)
            },
        ]
        .into_iter()
        .map(PlotConfig::Distribution)
        .collect::<Vec<_>>();
        plots.push(PlotConfig::Scatter(ScatterConfig {
            overlay: vec![ImplementationRole::Reference],
            x_range: Some((0.01, 10.0)),
            y_range: Some((0.001, 10.0)),
            ..ScatterConfig::new(Attribute::CharacteristicLength, Attribute::AreaToMassRatio)
        }));
        Ok(Self { plots })
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("no population matches the requested overlay")]
    NoPopulations,
    #[display("{_0}")]
    IncompatibleAttribute(IncompatibleAttributeError),
    #[display("invalid bin layout or threshold grid")]
    Binning(BinningError),
}

impl From<IncompatibleAttributeError> for RenderError {
    fn from(err: IncompatibleAttributeError) -> Self {
        Self::IncompatibleAttribute(err)
    }
}

impl From<BinningError> for RenderError {
    fn from(err: BinningError) -> Self {
        Self::Binning(err)
    }
}

fn overlaid<'a>(
    populations: &[&'a FragmentPopulation],
    overlay: &[ImplementationRole],
) -> Result<Vec<&'a FragmentPopulation>, RenderError> {
    let mut selected = Vec::new();
    for role in overlay {
        selected.extend(
            populations
                .iter()
                .copied()
                .filter(|population| population.role() == *role),
        );
    }
    if selected.is_empty() {
        return Err(RenderError::NoPopulations);
    }
    Ok(selected)
}

fn comparison_title(subject: &str, populations: &[&FragmentPopulation]) -> String {
    let labels = populations
        .iter()
        .map(|population| population.label())
        .collect::<Vec<_>>()
        .join(" vs. ");
    let scenario = populations
        .first()
        .map(|population| population.scenario())
        .unwrap_or_default();
    format!("{subject} Distribution {labels} for {scenario}")
}

/// Renders one distribution figure, with one series per overlaid population.
///
/// Histogram views produce `(lower bin edge, count)` series and carry the full
/// bin edges; survival views produce `(threshold, count)` series over a
/// geometric grid spanning a log-space binning, or the attribute's range of
/// interest for a linear one. The x-axis scale follows the binning, except
/// for survival views, which are always log-scaled.
///
/// # Examples
///
/// ```
/// use breakup_analysis::{
///     attribute::Attribute,
///     distribution::{DistributionConfig, render_distribution},
///     fragment::FragmentRecord,
///     population::{FragmentPopulation, ImplementationRole},
/// };
/// use breakup_stats::binning::Binning;
///
/// let records = [0.002, 0.02, 0.03, 2.0]
///     .map(|lc| FragmentRecord::new(String::new(), lc, 0.1, None))
///     .to_vec();
/// let population =
///     FragmentPopulation::from_records("Iridium-Kosmos", ImplementationRole::Reference, "C++", records)
///         .unwrap();
///
/// let config = DistributionConfig::histogram(
///     Attribute::CharacteristicLength,
///     Binning::log_space(0.001, 10.0, 4).unwrap(),
/// );
/// let plot = render_distribution(&config, &[&population]).unwrap();
/// assert_eq!(plot.series[0].y, vec![1.0, 2.0, 0.0, 1.0]);
/// assert_eq!(plot.edges.unwrap().len(), 5);
/// ```
pub fn render_distribution(
    config: &DistributionConfig,
    populations: &[&FragmentPopulation],
) -> Result<Plot, RenderError> {
    let populations = overlaid(populations, &config.overlay)?;
    let attribute = config.attribute;
    let binning = config.effective_binning()?;
    let thresholds = match config.transform {
        Transform::Survival { grid_points } => {
            let (lo, hi) = match binning.scale() {
                AxisScale::Log => (binning.lo(), binning.hi()),
                AxisScale::Linear => attribute.range_of_interest(),
            };
            Some(geometric_grid(lo, hi, grid_points)?)
        }
        Transform::None | Transform::Cumulative => None,
    };

    let series = populations
        .par_iter()
        .map(|population| {
            let distribution = EmpiricalDistribution::new(population, attribute)?;
            tracing::debug!(
                attribute = attribute.id(),
                population = %population.display_name(),
                samples = distribution.len(),
                "rendering distribution"
            );
            let series = if let Some(thresholds) = &thresholds {
                let curve = distribution.survival(thresholds);
                #[expect(clippy::cast_precision_loss)]
                let y = match config.count_mode {
                    CountMode::Raw => curve.counts.iter().map(|&count| count as f64).collect(),
                    CountMode::Relative => curve.fractions(),
                };
                Series::new(population.label(), curve.thresholds, y)
            } else {
                let histogram = distribution.histogram(binning);
                let y = match config.transform {
                    Transform::Cumulative => histogram.cumulative(config.count_mode),
                    _ => histogram.counts(config.count_mode),
                };
                Series::new(population.label(), histogram.lower_edges(), y)
            };
            Ok(series)
        })
        .collect::<Result<Vec<_>, IncompatibleAttributeError>>()?;

    let (kind, subject, y_label) = match (config.transform, config.count_mode) {
        (Transform::Survival { .. }, CountMode::Raw) => {
            (PlotKind::Line, "Survival", "Number at or above")
        }
        (Transform::Survival { .. }, CountMode::Relative) => {
            (PlotKind::Line, "Survival", "Fraction at or above")
        }
        (Transform::Cumulative, CountMode::Raw) => {
            (PlotKind::Histogram, "Cumulative", "Number")
        }
        (Transform::Cumulative, CountMode::Relative) => {
            (PlotKind::Histogram, "Cumulative", "Relative Probability")
        }
        (Transform::None, CountMode::Raw) => (PlotKind::Histogram, "", "Number"),
        (Transform::None, CountMode::Relative) => {
            (PlotKind::Histogram, "", "Relative Probability")
        }
    };
    let subject = if subject.is_empty() {
        attribute.name().to_owned()
    } else {
        format!("{} {subject}", attribute.name())
    };

    Ok(Plot {
        title: comparison_title(&subject, &populations),
        x_label: attribute.label(),
        y_label: y_label.to_owned(),
        x_scale: if thresholds.is_some() {
            AxisScale::Log
        } else {
            binning.scale()
        },
        y_scale: config.y_scale,
        kind,
        edges: thresholds.is_none().then(|| binning.edges()),
        x_range: None,
        y_range: None,
        series,
    })
}

/// Renders a log/log scatter figure of two attributes, one point series per
/// overlaid population.
pub fn render_scatter(
    config: &ScatterConfig,
    populations: &[&FragmentPopulation],
) -> Result<Plot, RenderError> {
    let populations = overlaid(populations, &config.overlay)?;
    let series = populations
        .par_iter()
        .map(|population| {
            Ok(Series::new(
                population.label(),
                population.values(config.x)?,
                population.values(config.y)?,
            ))
        })
        .collect::<Result<Vec<_>, IncompatibleAttributeError>>()?;

    Ok(Plot {
        title: populations
            .first()
            .map(|population| population.scenario().to_owned())
            .unwrap_or_default(),
        x_label: config.x.label(),
        y_label: config.y.label(),
        x_scale: AxisScale::Log,
        y_scale: AxisScale::Log,
        kind: PlotKind::Scatter,
        edges: None,
        x_range: config.x_range,
        y_range: config.y_range,
        series,
    })
}

#[cfg(test)]
mod tests {
    use crate::fragment::{FragmentRecord, Velocity};

    use super::*;

    fn population(
        role: ImplementationRole,
        label: &str,
        values: &[f64],
        with_velocity: bool,
    ) -> FragmentPopulation {
        let records = values
            .iter()
            .map(|&value| {
                FragmentRecord::new(
                    String::new(),
                    value,
                    value * 2.0,
                    with_velocity.then(|| Velocity::new([value * 100.0, 0.0, 0.0])),
                )
            })
            .collect();
        FragmentPopulation::from_records("Iridium-Kosmos", role, label, records).unwrap()
    }

    fn pair() -> (FragmentPopulation, FragmentPopulation) {
        (
            population(
                ImplementationRole::Reference,
                "C++",
                &[0.002, 0.02, 0.03, 2.5, 20.0],
                true,
            ),
            population(ImplementationRole::Candidate, "Python", &[0.5, 1.5], false),
        )
    }

    #[test]
    fn test_histogram_series_per_population() {
        let (reference, candidate) = pair();
        let config = DistributionConfig::histogram(
            Attribute::CharacteristicLength,
            Binning::log_space(0.001, 10.0, 4).unwrap(),
        );
        let plot = render_distribution(&config, &[&candidate, &reference]).unwrap();

        assert_eq!(
            plot.title,
            "Characteristic Length Distribution C++ vs. Python for Iridium-Kosmos"
        );
        assert_eq!(plot.x_label, "Characteristic Length [m]");
        assert_eq!(plot.x_scale, AxisScale::Log);
        assert_eq!(plot.y_scale, AxisScale::Log);
        assert_eq!(plot.kind, PlotKind::Histogram);
        // overlay order, not argument order
        assert_eq!(plot.series[0].label, "C++");
        // 20.0 is outside the log-space range and excluded
        assert_eq!(plot.series[0].y, vec![1.0, 2.0, 0.0, 1.0]);
        assert_eq!(plot.series[1].y, vec![0.0, 0.0, 1.0, 1.0]);
        for series in &plot.series {
            assert_eq!(series.x.len(), series.y.len());
        }
    }

    #[test]
    fn test_linear_histogram_clips() {
        let (reference, _) = pair();
        let config = DistributionConfig::histogram(
            Attribute::CharacteristicLength,
            Binning::linear(0.0, 5.0, 5).unwrap(),
        );
        let plot = render_distribution(&config, &[&reference]).unwrap();
        assert_eq!(plot.x_scale, AxisScale::Linear);
        assert_eq!(plot.series[0].y, vec![3.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(
            plot.edges.unwrap(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_relative_cumulative() {
        let (reference, _) = pair();
        let config = DistributionConfig {
            count_mode: CountMode::Relative,
            transform: Transform::Cumulative,
            ..DistributionConfig::histogram(
                Attribute::CharacteristicLength,
                Binning::log_space(0.001, 10.0, 4).unwrap(),
            )
        };
        let plot = render_distribution(&config, &[&reference]).unwrap();
        // the excluded sample still counts in the denominator
        let expected = [0.2, 0.6, 0.6, 0.8];
        for (actual, expected) in plot.series[0].y.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-12);
        }
        assert_eq!(plot.y_label, "Relative Probability");
    }

    #[test]
    fn test_survival_series() {
        let (reference, candidate) = pair();
        let config = DistributionConfig {
            binning: Some(Binning::log_space(0.01, 100.0, 4).unwrap()),
            transform: Transform::Survival { grid_points: 5 },
            ..DistributionConfig::survival(Attribute::CharacteristicLength)
        };
        let plot = render_distribution(&config, &[&reference, &candidate]).unwrap();
        assert_eq!(plot.kind, PlotKind::Line);
        assert_eq!(plot.edges, None);
        assert_eq!(plot.series[0].x.len(), 5);
        assert_eq!(plot.series[0].y, vec![4.0, 2.0, 2.0, 1.0, 0.0]);
        assert_eq!(plot.series[1].y, vec![2.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_survival_with_linear_binning() {
        let (reference, _) = pair();
        let config = DistributionConfig {
            binning: Some(Binning::linear(0.0, 5.0, 99).unwrap()),
            transform: Transform::Survival { grid_points: 5 },
            ..DistributionConfig::survival(Attribute::CharacteristicLength)
        };
        let plot = render_distribution(&config, &[&reference]).unwrap();
        // grid over the range of interest 0.001..10
        let x = &plot.series[0].x;
        assert_eq!(x.len(), 5);
        assert!((x[0] - 0.001).abs() < 1e-12);
        assert!((x[4] - 10.0).abs() < 1e-9);
        assert_eq!(plot.x_scale, AxisScale::Log);
        assert_eq!(plot.series[0].y, vec![5.0, 4.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_missing_attribute_fails_render() {
        let (reference, candidate) = pair();
        let config = DistributionConfig::histogram(
            Attribute::VelocityMagnitude,
            Binning::linear(0.0, 10_000.0, 99).unwrap(),
        );
        assert!(matches!(
            render_distribution(&config, &[&reference, &candidate]).unwrap_err(),
            RenderError::IncompatibleAttribute(IncompatibleAttributeError {
                attribute: Attribute::VelocityMagnitude,
                ..
            })
        ));

        let reference_only = DistributionConfig {
            overlay: vec![ImplementationRole::Reference],
            ..config
        };
        let plot = render_distribution(&reference_only, &[&reference, &candidate]).unwrap();
        assert_eq!(plot.series.len(), 1);
    }

    #[test]
    fn test_empty_overlay() {
        let (reference, _) = pair();
        let config = DistributionConfig {
            overlay: vec![ImplementationRole::Candidate],
            ..DistributionConfig::survival(Attribute::AreaToMassRatio)
        };
        assert_eq!(
            render_distribution(&config, &[&reference]).unwrap_err(),
            RenderError::NoPopulations
        );
    }

    #[test]
    fn test_scatter() {
        let (reference, _) = pair();
        let config = ScatterConfig::new(Attribute::VelocityMagnitude, Attribute::AreaToMassRatio);
        let plot = render_scatter(&config, &[&reference]).unwrap();
        assert_eq!(plot.title, "Iridium-Kosmos");
        assert_eq!((plot.x_scale, plot.y_scale), (AxisScale::Log, AxisScale::Log));
        assert_eq!(plot.series[0].len(), 5);
        assert_eq!(plot.series[0].y[0], 0.004);
        assert_eq!(plot.x_range, None);

        let limited = ScatterConfig {
            x_range: Some((0.001, 10.0)),
            y_range: Some((0.001, 100.0)),
            ..config
        };
        let plot = render_scatter(&limited, &[&reference]).unwrap();
        assert_eq!(plot.x_range, Some((0.001, 10.0)));
        assert_eq!(plot.y_range, Some((0.001, 100.0)));
    }

    #[test]
    fn test_single_population_set() {
        let (reference, candidate) = pair();
        let set = PlotSet::single_population().unwrap();
        assert_eq!(set.plots.len(), 5);
        for config in &set.plots {
            let plot = config.render(&[&reference, &candidate]).unwrap();
            assert_eq!(plot.series.len(), 1);
            assert_eq!(plot.series[0].label, "C++");
        }

        let PlotConfig::Distribution(lc) = &set.plots[1] else {
            panic!("expected a distribution plot");
        };
        let plot = render_distribution(lc, &[&reference]).unwrap();
        // all five samples lie in 0..10 or are clipped into the last bin
        assert!((plot.series[0].y.last().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_set_names_are_unique() {
        let set = PlotSet::standard().unwrap();
        let mut names = set.plots.iter().map(PlotConfig::name).collect::<Vec<_>>();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 11);
    }

    #[test]
    fn test_plot_set_from_json() {
        let json = r#"{
            "plots": [
                {
                    "plot": "distribution",
                    "attribute": "area_to_mass_ratio",
                    "binning": { "kind": "log_space", "lo": 0.001, "hi": 10.0, "num_bins": 49 },
                    "count_mode": "relative",
                    "transform": { "kind": "cumulative" }
                },
                { "plot": "distribution", "attribute": "velocity_magnitude", "transform": { "kind": "survival" } },
                { "plot": "scatter", "x": "characteristic_length", "y": "area_to_mass_ratio" }
            ]
        }"#;
        let set: PlotSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.plots.len(), 3);
        let PlotConfig::Distribution(survival) = &set.plots[1] else {
            panic!("expected a distribution plot");
        };
        assert_eq!(
            survival.transform,
            Transform::Survival {
                grid_points: DEFAULT_GRID_POINTS
            }
        );
        assert_eq!(survival.overlay, default_overlay());
        assert_eq!(set.plots[2].name(), "scatter_lc_am");
    }

    #[test]
    fn test_invalid_binning_in_json_is_rejected() {
        let json = r#"{
            "plot": "distribution",
            "attribute": "characteristic_length",
            "binning": { "kind": "log_space", "lo": 0.0, "hi": 10.0, "num_bins": 4 }
        }"#;
        assert!(serde_json::from_str::<PlotConfig>(json).is_err());
    }
}
