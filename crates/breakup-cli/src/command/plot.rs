use std::{fs, path::PathBuf};

use anyhow::Context as _;
use breakup_analysis::distribution::PlotSet;
use clap::{Args, ValueEnum};

use crate::{
    command::PopulationPairArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Comparison suite overlaying both implementations
    Standard,
    /// Relative distributions of the reference implementation
    Single,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct PlotArg {
    #[clap(flatten)]
    pub populations: PopulationPairArg,

    /// Plot set JSON file, replacing the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Built-in plot set used without `--config`
    #[arg(long, value_enum, default_value_t = Preset::Standard, conflicts_with = "config")]
    preset: Preset,

    /// Directory receiving one JSON plot description per plot
    #[arg(long, default_value = "plots")]
    pub output_dir: PathBuf,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let plot_set = match &arg.config {
        Some(path) => util::read_json_file::<PlotSet, _>("plot set", path)?,
        None => match arg.preset {
            Preset::Standard => PlotSet::standard(),
            Preset::Single => PlotSet::single_population(),
        }
        .context("Failed to build the plot set preset")?,
    };
    let (reference, candidate) = arg.populations.load()?;
    let populations = [&reference, &candidate];

    fs::create_dir_all(&arg.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            arg.output_dir.display()
        )
    })?;

    let mut written = 0;
    let mut skipped = Vec::new();
    for config in &plot_set.plots {
        let name = config.name();
        let plot = match config.render(&populations) {
            Ok(plot) => plot,
            Err(err) => {
                tracing::warn!(plot = %name, "skipping plot: {err}");
                skipped.push(name);
                continue;
            }
        };
        let path = arg.output_dir.join(format!("{}_{name}.json", arg.populations.scenario));
        Output::save_json(&plot, Some(path.clone()))?;
        println!("  {:<32} -> {}", name, path.display());
        written += 1;
    }

    println!("\n{written} plots written to {}", arg.output_dir.display());
    if !skipped.is_empty() {
        println!("{} plots skipped: {}", skipped.len(), skipped.join(", "));
    }
    Ok(())
}
