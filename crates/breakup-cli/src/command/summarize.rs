use std::path::PathBuf;

use breakup_analysis::population::{FragmentPopulation, ImplementationRole};
use clap::Args;
use rayon::prelude::*;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummarizeArg {
    /// Fragment CSV files to summarize
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let populations = arg
        .files
        .par_iter()
        .map(|path| {
            let label = path.display().to_string();
            util::load_population(path, "", ImplementationRole::Reference, &label)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for population in &populations {
        print_summary(population);
        println!();
    }
    Ok(())
}

fn print_summary(population: &FragmentPopulation) {
    println!("{}", population.label());
    println!(
        "  {} records, {} range outliers",
        population.len(),
        population.outliers().len()
    );
    println!(
        "  {:<24} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Attribute", "Min", "Max", "Mean", "Median", "Std Dev",
    );
    // attribute(24) + 5 * value(12) + spaces(5)
    println!("  {}", "-".repeat(89));
    for (attribute, stats) in population.summarize() {
        match stats {
            Some(stats) => println!(
                "  {:<24} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e}",
                attribute.label(),
                stats.min,
                stats.max,
                stats.mean,
                stats.median,
                stats.std_dev,
            ),
            None => println!("  {:<24} {:>12}", attribute.label(), "N/A"),
        }
    }
}
