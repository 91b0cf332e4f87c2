use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use solver_compare_shared::config::{AggregationConfig, MAX_WORKERS};
use solver_compare_shared::ExperimentSummary;

use crate::discovery::discover_experiments;
use crate::error::StatsError;
use crate::{aggregator, parser, reducer, report};

/// Parses, reduces and aggregates one experiment file.
pub fn summarize_contents(
    contents: &str,
    config: &AggregationConfig,
) -> Result<ExperimentSummary, StatsError> {
    let parsed = parser::parse_experiment(contents)?;
    let reduced = reducer::reduce(parsed)?;
    Ok(aggregator::aggregate(&reduced, config)?)
}

pub fn summarize_file(path: &Path, config: &AggregationConfig) -> anyhow::Result<ExperimentSummary> {
    log::info!("working on: {}", path.display());
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    summarize_contents(&contents, config)
        .with_context(|| format!("failed to summarize {}", path.display()))
}

/// Summaries of `paths`, returned in input order.
pub fn summarize_batch(
    paths: &[PathBuf],
    config: &AggregationConfig,
    n_workers: Option<usize>,
) -> anyhow::Result<Vec<anyhow::Result<ExperimentSummary>>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers.unwrap_or_else(|| rayon::current_num_threads().min(MAX_WORKERS)))
        .build()?;

    Ok(pool.install(|| {
        paths
            .par_iter()
            .map(|path| summarize_file(path, config))
            .collect()
    }))
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub files: Vec<PathBuf>,
    pub rows_written: usize,
}

/// Writes one summary row per experiment file under `input_dir`.
///
/// Rows are appended in discovery order. The first failing file stops the
/// batch; rows written before it are left in place.
pub fn run_batch(
    input_dir: &Path,
    output: &Path,
    config: &AggregationConfig,
    n_workers: Option<usize>,
) -> anyhow::Result<BatchResult> {
    let files = discover_experiments(input_dir)?;
    report::write_header(output)?;

    let summaries = summarize_batch(&files, config, n_workers)?;
    let mut rows_written = 0;
    for (path, summary) in files.iter().zip(summaries) {
        let summary = summary?;
        report::append_row(output, &summary)
            .with_context(|| format!("failed to write row for {}", path.display()))?;
        rows_written += 1;
    }

    Ok(BatchResult {
        files,
        rows_written,
    })
}
