pub mod config;
pub mod solver;
pub mod summary;

pub use solver::{PerSolver, Solver, SolverTag};
pub use summary::{ExperimentSummary, Stat};
