use std::path::Path;

use solver_compare_shared::config::AggregationConfig;
use solver_compare_stats::runner;

use crate::output;

pub fn run(
    input: &Path,
    output_path: &Path,
    workers: usize,
    instances_per_experiment: Option<usize>,
) -> anyhow::Result<()> {
    let config = AggregationConfig::default().with_instances_per_experiment(instances_per_experiment);
    let n_workers = if workers == 0 { None } else { Some(workers) };

    println!(
        "Summarizing experiments under {} into {}...",
        input.display(),
        output_path.display(),
    );

    let start = std::time::Instant::now();
    let result = runner::run_batch(input, output_path, &config, n_workers)?;
    let elapsed = start.elapsed();

    output::print_batch(&result, output_path, elapsed);
    Ok(())
}
