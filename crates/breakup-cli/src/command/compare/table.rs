//! Comparison report table display

use breakup_analysis::{
    comparison::{ComparisonReport, Outcome},
    population::FragmentPopulation,
};

/// Print one line describing a loaded population
pub(super) fn print_population_line(population: &FragmentPopulation) {
    println!(
        "  {:<24} {:>10} records {:>6} range outliers",
        population.display_name(),
        population.len(),
        population.outliers().len(),
    );
}

fn print_report_table_header() {
    println!(
        "  {:<22} {:>10} {:>12} {:>10} {:>10} {:>12} {:>10}",
        "Attribute", "D", "p-value", "n", "m", "Location", "Result",
    );
    // attribute(22) + D(10) + p(12) + n(10) + m(10) + location(12) + result(10) + spaces(6)
    println!("  {}", "-".repeat(92));
}

/// Print a formatted comparison table, one row per attribute
pub(super) fn print_report_table(report: &ComparisonReport) {
    print_report_table_header();
    for entry in &report.entries {
        match &entry.outcome {
            Outcome::Compared { result, rejected } => {
                let verdict = if *rejected { "differ" } else { "same" };
                println!(
                    "  {:<22} {:>10.6} {:>12.4e} {:>10} {:>10} {:>12.4e} {:>10}",
                    entry.attribute.name(),
                    result.statistic,
                    result.p_value,
                    result.n,
                    result.m,
                    result.location,
                    verdict,
                );
            }
            Outcome::Failed { reason } => {
                println!("  {:<22} failed: {reason}", entry.attribute.name());
            }
        }
    }
}

/// Print legend explaining table columns
pub(super) fn print_legend(alpha: f64) {
    println!("Legend:");
    println!("  D        : Largest gap between the two empirical CDFs");
    println!("  p-value  : Asymptotic probability of a gap at least D under equal distributions");
    println!("  n, m     : Reference and candidate sample sizes");
    println!("  Location : First value at which the gap D is reached");
    println!("  Result   : \"differ\" when p-value < {alpha}");
}
