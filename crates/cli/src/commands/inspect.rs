use std::path::Path;

use solver_compare_shared::config::AggregationConfig;
use solver_compare_stats::runner;

use crate::output;

pub fn run(file: &Path, instances_per_experiment: Option<usize>) -> anyhow::Result<()> {
    let config = AggregationConfig::default().with_instances_per_experiment(instances_per_experiment);
    let summary = runner::summarize_file(file, &config)?;
    output::print_summary(file, &summary);
    Ok(())
}
