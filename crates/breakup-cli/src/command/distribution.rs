use std::path::PathBuf;

use anyhow::Context as _;
use breakup_analysis::{
    attribute::Attribute,
    distribution::{DistributionConfig, Transform, render_distribution},
};
use breakup_stats::{
    binning::{AxisScale, Binning},
    histogram::CountMode,
    survival::DEFAULT_GRID_POINTS,
};
use clap::{Args, ValueEnum};

use crate::{command::PopulationPairArg, util::Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BinningKind {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CountModeArg {
    Raw,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransformArg {
    #[value(name = "none")]
    Plain,
    Cumulative,
    Survival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScaleArg {
    Linear,
    Log,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct DistributionArg {
    #[clap(flatten)]
    pub populations: PopulationPairArg,

    /// Attribute to plot (lc, am, dv)
    #[arg(long)]
    pub attribute: Attribute,

    /// Bin spacing
    #[arg(long, value_enum, default_value_t = BinningKind::Log)]
    binning: BinningKind,

    /// Lower bound of the bins (defaults to the attribute's range of interest)
    #[arg(long, allow_negative_numbers = true)]
    pub lo: Option<f64>,

    /// Upper bound of the bins (defaults to the attribute's range of interest)
    #[arg(long)]
    pub hi: Option<f64>,

    /// Number of bins
    #[arg(long, default_value_t = 50)]
    pub bins: usize,

    #[arg(long, value_enum, default_value_t = CountModeArg::Raw)]
    count_mode: CountModeArg,

    #[arg(long, value_enum, default_value_t = TransformArg::Plain)]
    transform: TransformArg,

    /// Number of thresholds of a survival grid
    #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    #[arg(long, value_enum, default_value_t = ScaleArg::Log)]
    y_scale: ScaleArg,

    /// Save the plot description to this path instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl DistributionArg {
    fn to_config(&self) -> anyhow::Result<DistributionConfig> {
        let (default_lo, default_hi) = self.attribute.range_of_interest();
        let (lo, hi) = (
            self.lo.unwrap_or(default_lo),
            self.hi.unwrap_or(default_hi),
        );
        let binning = match self.binning {
            BinningKind::Linear => Binning::linear(lo, hi, self.bins),
            BinningKind::Log => Binning::log_space(lo, hi, self.bins),
        }
        .context("Invalid binning")?;

        let mut config = DistributionConfig::histogram(self.attribute, binning);
        config.count_mode = match self.count_mode {
            CountModeArg::Raw => CountMode::Raw,
            CountModeArg::Relative => CountMode::Relative,
        };
        config.transform = match self.transform {
            TransformArg::Plain => Transform::None,
            TransformArg::Cumulative => Transform::Cumulative,
            TransformArg::Survival => Transform::Survival {
                grid_points: self.grid_points,
            },
        };
        config.y_scale = match self.y_scale {
            ScaleArg::Linear => AxisScale::Linear,
            ScaleArg::Log => AxisScale::Log,
        };
        Ok(config)
    }
}

pub(crate) fn run(arg: &DistributionArg) -> anyhow::Result<()> {
    let config = arg.to_config()?;
    let (reference, candidate) = arg.populations.load()?;
    let plot = render_distribution(&config, &[&reference, &candidate])
        .with_context(|| format!("Failed to render {}", config.name()))?;
    Output::save_json(&plot, arg.output.clone())
}
