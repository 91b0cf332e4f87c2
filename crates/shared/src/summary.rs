use std::fmt;

use crate::config::{NO_DATA_MARKER, UNKNOWN_MARKER};
use crate::solver::{PerSolver, Solver};

/// One cell of a summary row.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat {
    Number(f64),
    Count(usize),
    Text(String),
    /// The solver produced no data for this statistic.
    NoData,
    /// Optimality is not proven for every instance of the file.
    Unknown,
}

impl Stat {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Stat::NoData, Stat::Number)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Stat::Number(v) => Some(*v),
            Stat::Count(c) => Some(*c as f64),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Stat::NoData | Stat::Unknown)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Number(v) => write!(f, "{}", v),
            Stat::Count(c) => write!(f, "{}", c),
            Stat::Text(s) => f.write_str(s),
            Stat::NoData => f.write_str(NO_DATA_MARKER),
            Stat::Unknown => f.write_str(UNKNOWN_MARKER),
        }
    }
}

/// Frozen statistics of one experiment file.
///
/// Field order of [`ExperimentSummary::column_names`] and
/// [`ExperimentSummary::values`] defines the CSV layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSummary {
    pub instance_type: String,
    pub time_limit: f64,
    /// Instances with a feasible record. Only the exact solvers are reported.
    pub feasible: PerSolver<usize>,
    /// Instances on which the solver matched the best known cost.
    pub best_known: PerSolver<Stat>,
    pub perc_optimal: PerSolver<Stat>,
    pub avg_cost: PerSolver<Stat>,
    pub avg_runtime: PerSolver<Stat>,
    pub avg_perc_deviation: PerSolver<Stat>,
    pub avg_perc_deviation_lower_bound: Stat,
    pub avg_optimal_runtime: PerSolver<Stat>,
    pub avg_improvement_percent: Stat,
    pub avg_iterations_to_best: Stat,
    pub avg_time_to_best: Stat,
    pub avg_total_iterations: Stat,
}

const EXACT: [Solver; 2] = [Solver::BinPacking, Solver::ThreeIndex];
const PERC_OPT_ORDER: [Solver; 3] = [Solver::ThreeIndex, Solver::BinPacking, Solver::Heuristic];

fn per_solver_columns<'a>(
    prefix: &str,
    solvers: &'a [Solver],
) -> impl Iterator<Item = String> + 'a {
    let prefix = prefix.to_string();
    solvers
        .iter()
        .map(move |s| format!("{}_{}", prefix, s.column_suffix()))
}

impl ExperimentSummary {
    pub fn column_names() -> Vec<String> {
        let mut names = vec!["instance_type".to_string(), "time_limit".to_string()];
        names.extend(per_solver_columns("feasible", &EXACT));
        names.extend(per_solver_columns("best_known", &Solver::ALL));
        names.extend(per_solver_columns("perc_opt", &PERC_OPT_ORDER));
        names.extend(per_solver_columns("avg_costs", &Solver::ALL));
        names.extend(per_solver_columns("avg_runtime", &Solver::ALL));
        names.extend(per_solver_columns("avg_perc_dev_from_best_known", &Solver::ALL));
        names.push("avg_perc_dev_from_LB_best_known".to_string());
        names.extend(per_solver_columns("avg_optimal_runtime", &Solver::ALL));
        names.extend(
            ["avg_perc_imp", "avg_iter_to_best", "avg_time_to_best", "avg_iterations"]
                .into_iter()
                .map(String::from),
        );
        names
    }

    pub fn values(&self) -> Vec<Stat> {
        let mut values = vec![
            Stat::Text(self.instance_type.clone()),
            Stat::Number(self.time_limit),
        ];
        values.extend(EXACT.iter().map(|&s| Stat::Count(self.feasible[s])));
        values.extend(Solver::ALL.iter().map(|&s| self.best_known[s].clone()));
        values.extend(PERC_OPT_ORDER.iter().map(|&s| self.perc_optimal[s].clone()));
        values.extend(Solver::ALL.iter().map(|&s| self.avg_cost[s].clone()));
        values.extend(Solver::ALL.iter().map(|&s| self.avg_runtime[s].clone()));
        values.extend(Solver::ALL.iter().map(|&s| self.avg_perc_deviation[s].clone()));
        values.push(self.avg_perc_deviation_lower_bound.clone());
        values.extend(Solver::ALL.iter().map(|&s| self.avg_optimal_runtime[s].clone()));
        values.push(self.avg_improvement_percent.clone());
        values.push(self.avg_iterations_to_best.clone());
        values.push(self.avg_time_to_best.clone());
        values.push(self.avg_total_iterations.clone());
        values
    }

    /// Named cells in column order.
    pub fn cells(&self) -> Vec<(String, Stat)> {
        Self::column_names().into_iter().zip(self.values()).collect()
    }

    /// Every field is followed by a comma, including the last one.
    pub fn header_line() -> String {
        terminated_line(Self::column_names().iter())
    }

    pub fn data_line(&self) -> String {
        terminated_line(self.values().iter())
    }
}

fn terminated_line<T: fmt::Display>(fields: impl Iterator<Item = T>) -> String {
    let mut line = String::new();
    for field in fields {
        line.push_str(&field.to_string());
        line.push(',');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExperimentSummary {
        ExperimentSummary {
            instance_type: "slp_instance_20".to_string(),
            time_limit: 300.0,
            feasible: PerSolver { bin_packing: 2, three_index: 0, heuristic: 2 },
            best_known: PerSolver {
                bin_packing: Stat::Count(2),
                three_index: Stat::NoData,
                heuristic: Stat::Count(1),
            },
            perc_optimal: PerSolver::from_fn(|_| Stat::Unknown),
            avg_cost: PerSolver {
                bin_packing: Stat::Number(10.5),
                three_index: Stat::NoData,
                heuristic: Stat::Number(11.0),
            },
            avg_runtime: PerSolver::from_fn(|_| Stat::Number(1.25)),
            avg_perc_deviation: PerSolver::from_fn(|_| Stat::Number(0.0)),
            avg_perc_deviation_lower_bound: Stat::Number(4.5),
            avg_optimal_runtime: PerSolver::from_fn(|_| Stat::NoData),
            avg_improvement_percent: Stat::Number(3.25),
            avg_iterations_to_best: Stat::Number(12.0),
            avg_time_to_best: Stat::Number(0.5),
            avg_total_iterations: Stat::Number(40.0),
        }
    }

    #[test]
    fn test_header_and_values_align() {
        let names = ExperimentSummary::column_names();
        assert_eq!(names.len(), 27);
        assert_eq!(names.len(), sample().values().len());
        assert_eq!(names[0], "instance_type");
        assert_eq!(names[7], "perc_opt_3Idx");
        assert_eq!(names[8], "perc_opt_BinP");
        assert_eq!(names[19], "avg_perc_dev_from_LB_best_known");
        assert_eq!(names[26], "avg_iterations");
    }

    #[test]
    fn test_lines_have_trailing_comma() {
        let header = ExperimentSummary::header_line();
        assert!(header.starts_with("instance_type,time_limit,feasible_BinP,feasible_3Idx,"));
        assert!(header.ends_with("avg_iterations,\n"));

        let data = sample().data_line();
        assert!(data.starts_with("slp_instance_20,300,2,0,2,---,1,unknown,unknown,unknown,10.5,---,11,"));
        assert!(data.ends_with(",\n"));
        assert_eq!(data.matches(',').count(), 27);
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(Stat::NoData.to_string(), "---");
        assert_eq!(Stat::Unknown.to_string(), "unknown");
        assert_eq!(Stat::Number(0.123457).to_string(), "0.123457");
        assert_eq!(Stat::from_option(None), Stat::NoData);
        assert!(Stat::NoData.is_marker());
        assert!(!Stat::Count(0).is_marker());
    }
}
