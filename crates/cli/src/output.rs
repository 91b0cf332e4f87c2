use std::path::Path;
use std::time::Duration;

use solver_compare_shared::ExperimentSummary;
use solver_compare_stats::BatchResult;

pub fn print_batch(result: &BatchResult, output: &Path, elapsed: Duration) {
    println!("\n========================================");
    println!("  Files:   {}", result.files.len());
    println!("  Rows:    {}", result.rows_written);
    println!("  Time:    {:.2}s", elapsed.as_secs_f64());
    println!("  Output:  {}", output.display());
    println!("========================================");
}

pub fn print_summary(file: &Path, summary: &ExperimentSummary) {
    println!("{}", file.display());
    let cells = summary.cells();
    let width = cells.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in cells {
        println!("  {:<width$}  {}", name, value, width = width);
    }
}
