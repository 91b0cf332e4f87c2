pub mod aggregator;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod reducer;
pub mod report;
pub mod runner;

pub use error::{AggregateError, ParseError, ReduceError, StatsError};
pub use runner::{run_batch, summarize_contents, summarize_file, BatchResult};
