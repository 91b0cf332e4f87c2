use std::path::PathBuf;

use solver_compare_shared::SolverTag;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: malformed {tag} record: {reason}")]
    MalformedRecord {
        line: usize,
        tag: SolverTag,
        reason: String,
    },
    #[error("line {line}: instance id {id:?} has no numeric trailing token")]
    BadInstanceId { line: usize, id: String },
    #[error("experiment file contains no data lines")]
    EmptyExperiment,
    #[error("no data line carries a numeric time limit")]
    MissingTimeLimit,
}

#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("line {line}: instance {found} follows instance {current}")]
    UnorderedInstances {
        line: usize,
        current: usize,
        found: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("mean of empty collection: {0}")]
    EmptyAggregation(&'static str),
    #[error("percentage deviation of {value} from zero reference ({what})")]
    ZeroReference { what: &'static str, value: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Reduce(#[from] ReduceError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("no experiment files (*.csv) found under {}", .0.display())]
    MissingInput(PathBuf),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
