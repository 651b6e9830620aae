use std::path::PathBuf;

use breakup_analysis::benchmark::TimingDataset;
use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct TimingsArg {
    /// Timing dataset JSON file
    pub dataset: PathBuf,

    /// Save the runtime plot description to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TimingsArg) -> anyhow::Result<()> {
    let dataset: TimingDataset = util::read_json_file("timing dataset", &arg.dataset)?;

    println!("{}", dataset.title);
    println!("==========================================\n");
    println!(
        "  {:<16} {:>10} {:>14} {:>8} {:>14}",
        "Approach", "L_c [m]", "Fragments", "Runs", "Average [ms]",
    );
    // approach(16) + lc(10) + fragments(14) + runs(8) + average(14) + spaces(4)
    println!("  {}", "-".repeat(66));
    for approach in &dataset.approaches {
        for point in &approach.points {
            let average = point
                .average_ms()
                .map_or("N/A".to_string(), |avg| format!("{avg:.3}"));
            println!(
                "  {:<16} {:>10} {:>14} {:>8} {:>14}",
                approach.approach,
                point.characteristic_length,
                point.fragment_count,
                point.times_ms.len(),
                average,
            );
        }
    }

    if let Some(path) = &arg.output {
        Output::save_json(&dataset.to_plot(), Some(path.clone()))?;
        println!("\nPlot saved to: {}", path.display());
    }
    Ok(())
}
