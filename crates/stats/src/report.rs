use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use solver_compare_shared::ExperimentSummary;

use crate::error::StatsError;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StatsError + '_ {
    move |source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Truncates `path` and writes the column header.
pub fn write_header(path: &Path) -> Result<(), StatsError> {
    let mut file = File::create(path).map_err(io_err(path))?;
    file.write_all(ExperimentSummary::header_line().as_bytes())
        .map_err(io_err(path))
}

/// Appends one summary row with a single write.
pub fn append_row(path: &Path, summary: &ExperimentSummary) -> Result<(), StatsError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(io_err(path))?;
    file.write_all(summary.data_line().as_bytes())
        .map_err(io_err(path))
}
