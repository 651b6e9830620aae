use std::path::PathBuf;

use anyhow::Context as _;
use breakup_analysis::population::{FragmentPopulation, ImplementationRole};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    compare::CompareArg, distribution::DistributionArg, plot::PlotArg, summarize::SummarizeArg,
    timings::TimingsArg,
};
use crate::util;

mod compare;
mod distribution;
mod plot;
mod summarize;
mod timings;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Raise log verbosity (-v: info, -vv: debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compare two fragment populations attribute by attribute (KS test)
    Compare(#[clap(flatten)] CompareArg),
    /// Render a set of comparison plots as JSON descriptions
    Plot(#[clap(flatten)] PlotArg),
    /// Render a single distribution plot as a JSON description
    Distribution(#[clap(flatten)] DistributionArg),
    /// Print descriptive statistics of fragment files
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Plot recorded runtime measurements
    Timings(#[clap(flatten)] TimingsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
        Mode::Distribution(arg) => distribution::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Timings(arg) => timings::run(&arg)?,
    }
    Ok(())
}

/// Log to stderr, so that stdout only carries reports and JSON
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reference and candidate fragment files of one scenario
#[derive(Debug, Clone, Args)]
pub(crate) struct PopulationPairArg {
    /// Fragment CSV file of the reference implementation
    pub reference: PathBuf,

    /// Fragment CSV file of the candidate implementation
    pub candidate: PathBuf,

    /// Scenario label, e.g. "Iridium-Kosmos"
    #[arg(long)]
    pub scenario: String,

    /// Display label of the reference implementation
    #[arg(long, default_value = "C++")]
    pub reference_label: String,

    /// Display label of the candidate implementation
    #[arg(long, default_value = "Python")]
    pub candidate_label: String,

    /// Drop range outliers (negative length, non-positive A/M) before analysis
    #[arg(long)]
    pub exclude_outliers: bool,
}

impl PopulationPairArg {
    /// Load both populations concurrently
    pub fn load(&self) -> anyhow::Result<(FragmentPopulation, FragmentPopulation)> {
        let (reference, candidate) = rayon::join(
            || {
                util::load_population(
                    &self.reference,
                    &self.scenario,
                    ImplementationRole::Reference,
                    &self.reference_label,
                )
            },
            || {
                util::load_population(
                    &self.candidate,
                    &self.scenario,
                    ImplementationRole::Candidate,
                    &self.candidate_label,
                )
            },
        );
        let (reference, candidate) = (
            reference.context("Failed to load reference population")?,
            candidate.context("Failed to load candidate population")?,
        );

        if !self.exclude_outliers {
            return Ok((reference, candidate));
        }
        let (reference, candidate) = (reference.without_outliers(), candidate.without_outliers());
        tracing::info!(
            reference = reference.len(),
            candidate = candidate.len(),
            "excluded range outliers"
        );
        Ok((reference, candidate))
    }
}
