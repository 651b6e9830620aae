//! Statistical comparison command
//!
//! Runs a two-sample Kolmogorov–Smirnov test per attribute on the reference
//! and candidate populations of a scenario, prints a report table, and
//! optionally saves the report as JSON.

mod table;

use std::path::PathBuf;

use anyhow::Context as _;
use breakup_analysis::{
    attribute::Attribute,
    comparison::{ComparisonReport, DEFAULT_ALPHA},
};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::{command::PopulationPairArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    pub populations: PopulationPairArg,

    /// Attributes to compare (comma-separated: lc, am, dv)
    #[arg(long, value_delimiter = ',', default_values = ["lc", "am", "dv"])]
    pub attributes: Vec<Attribute>,

    /// Significance level of the "same distribution" hypothesis
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Save the report as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    outliers_excluded: bool,
    #[serde(flatten)]
    report: &'a ComparisonReport,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.alpha > 0.0 && arg.alpha < 1.0,
        "alpha must lie in (0, 1), got {}",
        arg.alpha
    );
    let (reference, candidate) = arg.populations.load()?;
    let report = ComparisonReport::build(&reference, &candidate, &arg.attributes, arg.alpha)
        .context("Failed to build comparison report")?;

    println!(
        "Comparison Report: {} ({} vs. {})",
        report.scenario, report.reference, report.candidate
    );
    println!("==========================================\n");
    table::print_population_line(&reference);
    table::print_population_line(&candidate);
    println!();
    table::print_report_table(&report);
    println!();
    table::print_legend(report.alpha);

    if let Some(path) = &arg.output {
        let document = ReportDocument {
            generated_at: Utc::now(),
            outliers_excluded: arg.populations.exclude_outliers,
            report: &report,
        };
        Output::save_json(&document, Some(path.clone()))?;
        println!("\nReport saved to: {}", path.display());
    }

    Ok(())
}
