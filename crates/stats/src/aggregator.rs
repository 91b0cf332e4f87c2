use solver_compare_shared::config::{round_to, AggregationConfig};
use solver_compare_shared::{ExperimentSummary, PerSolver, Solver, Stat};

use crate::error::AggregateError;
use crate::reducer::ReducedExperiment;

/// Arithmetic mean. Callers check for emptiness first; reaching the error
/// means a guard is missing.
pub fn mean(values: &[f64], what: &'static str) -> Result<f64, AggregateError> {
    if values.is_empty() {
        return Err(AggregateError::EmptyAggregation(what));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// `|value - reference| / reference * 100`.
pub fn percentage_deviation(
    value: f64,
    reference: f64,
    what: &'static str,
) -> Result<f64, AggregateError> {
    if reference == 0.0 {
        if value == 0.0 {
            return Ok(0.0);
        }
        return Err(AggregateError::ZeroReference { what, value });
    }
    Ok((value - reference).abs() / reference * 100.0)
}

fn rounded_mean_or_no_data(
    values: &[f64],
    decimals: u32,
    what: &'static str,
) -> Result<Stat, AggregateError> {
    if values.is_empty() {
        return Ok(Stat::NoData);
    }
    Ok(Stat::Number(round_to(mean(values, what)?, decimals)))
}

/// Statistics of one compared solver over all instances of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverStats {
    pub feasible: usize,
    pub best_known: usize,
    pub optimally_solved: usize,
    pub avg_cost: Stat,
    pub avg_runtime: Stat,
    pub avg_perc_deviation: Stat,
    pub avg_optimal_runtime: Stat,
}

pub fn solver_stats(
    exp: &ReducedExperiment,
    solver: Solver,
    config: &AggregationConfig,
) -> Result<SolverStats, AggregateError> {
    let mut costs = Vec::new();
    let mut runtimes = Vec::new();
    let mut deviations = Vec::new();
    let mut optimal_runtimes = Vec::new();
    let mut best_known = 0;

    for inst in &exp.instances {
        let Some(cost) = inst.costs[solver] else {
            continue;
        };
        costs.push(cost);
        let runtime = inst.runtimes[solver];
        runtimes.extend(runtime);

        // a solver cost on the instance implies a best cost
        let Some(best) = inst.best_cost else {
            continue;
        };
        deviations.push(percentage_deviation(cost, best, "deviation from best known")?);
        if cost == best {
            best_known += 1;
            if inst.proven_optimal {
                optimal_runtimes.extend(runtime);
            }
        }
    }

    Ok(SolverStats {
        feasible: costs.len(),
        best_known,
        optimally_solved: optimal_runtimes.len(),
        avg_cost: rounded_mean_or_no_data(&costs, config.cost_decimals, "costs")?,
        avg_runtime: rounded_mean_or_no_data(&runtimes, config.runtime_decimals, "runtimes")?,
        avg_perc_deviation: rounded_mean_or_no_data(
            &deviations,
            config.deviation_decimals,
            "deviations from best known",
        )?,
        avg_optimal_runtime: rounded_mean_or_no_data(
            &optimal_runtimes,
            config.runtime_decimals,
            "optimal runtimes",
        )?,
    })
}

/// Local search figures reported for the heuristic only.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicExtras {
    pub avg_improvement_percent: Stat,
    pub avg_iterations_to_best: Stat,
    pub avg_time_to_best: Stat,
    pub avg_total_iterations: Stat,
}

/// `avg_heuristic_cost` is the already rounded mean cost of the final
/// heuristic results.
pub fn heuristic_extras(
    exp: &ReducedExperiment,
    avg_heuristic_cost: &Stat,
    config: &AggregationConfig,
) -> Result<HeuristicExtras, AggregateError> {
    let initial: Vec<f64> = exp
        .instances
        .iter()
        .flat_map(|inst| inst.initial_costs.iter().copied())
        .collect();
    let progress: Vec<_> = exp.instances.iter().filter_map(|inst| inst.progress).collect();
    let iterations_to_best: Vec<f64> = progress.iter().map(|p| p.iterations_to_best as f64).collect();
    let time_to_best: Vec<f64> = progress.iter().map(|p| p.runtime_to_best).collect();
    let total_iterations: Vec<f64> = progress.iter().map(|p| p.total_iterations as f64).collect();

    let avg_improvement_percent = match avg_heuristic_cost.as_f64() {
        Some(final_cost) if !initial.is_empty() => {
            let avg_initial = mean(&initial, "initial heuristic costs")?;
            let improvement = percentage_deviation(final_cost, avg_initial, "improvement")?;
            Stat::Number(round_to(improvement, config.cost_decimals))
        }
        _ => Stat::NoData,
    };

    Ok(HeuristicExtras {
        avg_improvement_percent,
        avg_iterations_to_best: rounded_mean_or_no_data(
            &iterations_to_best,
            config.cost_decimals,
            "iterations to best",
        )?,
        avg_time_to_best: rounded_mean_or_no_data(
            &time_to_best,
            config.runtime_decimals,
            "time to best",
        )?,
        avg_total_iterations: rounded_mean_or_no_data(
            &total_iterations,
            config.cost_decimals,
            "total iterations",
        )?,
    })
}

/// Deviation of the mean best known cost from the mean lower bound.
pub fn lower_bound_deviation(
    exp: &ReducedExperiment,
    config: &AggregationConfig,
) -> Result<Stat, AggregateError> {
    let best: Vec<f64> = exp.best_costs().into_iter().flatten().collect();
    let bounds: Vec<f64> = exp
        .instances
        .iter()
        .flat_map(|inst| inst.lower_bounds.iter().copied())
        .collect();
    if best.is_empty() || bounds.is_empty() {
        return Ok(Stat::NoData);
    }
    let deviation = percentage_deviation(
        mean(&best, "best known costs")?,
        mean(&bounds, "lower bounds")?,
        "deviation from lower bound",
    )?;
    Ok(Stat::Number(round_to(deviation, config.deviation_decimals)))
}

/// Percent of instances solved to proven optimality. Every solver gets the
/// unknown marker unless instances `0..expected` are all present and proven.
pub fn perc_optimal(
    exp: &ReducedExperiment,
    stats: &PerSolver<SolverStats>,
    config: &AggregationConfig,
) -> PerSolver<Stat> {
    let expected = config.expected_instances(exp.index_span());
    let known = exp.proven_through(expected);
    stats.map(|_, s| {
        if !known {
            Stat::Unknown
        } else if s.feasible == 0 {
            Stat::NoData
        } else {
            let percent = s.optimally_solved as f64 / expected as f64 * 100.0;
            Stat::Number(round_to(percent, config.cost_decimals))
        }
    })
}

/// Reduces one experiment into its summary row.
pub fn aggregate(
    exp: &ReducedExperiment,
    config: &AggregationConfig,
) -> Result<ExperimentSummary, AggregateError> {
    let stats = PerSolver {
        bin_packing: solver_stats(exp, Solver::BinPacking, config)?,
        three_index: solver_stats(exp, Solver::ThreeIndex, config)?,
        heuristic: solver_stats(exp, Solver::Heuristic, config)?,
    };
    let extras = heuristic_extras(exp, &stats.heuristic.avg_cost, config)?;
    let avg_perc_deviation_lower_bound = lower_bound_deviation(exp, config)?;
    let perc_optimal = perc_optimal(exp, &stats, config);

    log::debug!(
        "{}: feasible BinP={} 3Idx={} HC={}",
        exp.instance_type,
        stats.bin_packing.feasible,
        stats.three_index.feasible,
        stats.heuristic.feasible
    );

    Ok(ExperimentSummary {
        instance_type: exp.instance_type.clone(),
        time_limit: exp.time_limit,
        feasible: stats.map(|_, s| s.feasible),
        best_known: stats.map(|_, s| {
            if s.feasible == 0 {
                Stat::NoData
            } else {
                Stat::Count(s.best_known)
            }
        }),
        perc_optimal,
        avg_cost: stats.map(|_, s| s.avg_cost.clone()),
        avg_runtime: stats.map(|_, s| s.avg_runtime.clone()),
        avg_perc_deviation: stats.map(|_, s| s.avg_perc_deviation.clone()),
        avg_perc_deviation_lower_bound,
        avg_optimal_runtime: stats.map(|_, s| s.avg_optimal_runtime.clone()),
        avg_improvement_percent: extras.avg_improvement_percent,
        avg_iterations_to_best: extras.avg_iterations_to_best,
        avg_time_to_best: extras.avg_time_to_best,
        avg_total_iterations: extras.avg_total_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_experiment;
    use crate::reducer::reduce;

    const HEADER: &str = "instance,solver,time_limit,runtime,val,a,b,rt_best,it_best,iterations";

    fn summarize(body: &str) -> ExperimentSummary {
        let contents = format!("{}\n{}", HEADER, body);
        let reduced = reduce(parse_experiment(&contents).unwrap()).unwrap();
        aggregate(&reduced, &AggregationConfig::default()).unwrap()
    }

    #[test]
    fn test_mean_of_empty_fails_loudly() {
        assert!(matches!(mean(&[], "x"), Err(AggregateError::EmptyAggregation("x"))));
        assert_eq!(mean(&[1.0, 2.0, 6.0], "x").unwrap(), 3.0);
    }

    #[test]
    fn test_percentage_deviation() {
        assert_eq!(percentage_deviation(110.0, 100.0, "x").unwrap(), 10.0);
        assert_eq!(percentage_deviation(90.0, 100.0, "x").unwrap(), 10.0);
        assert_eq!(percentage_deviation(0.0, 0.0, "x").unwrap(), 0.0);
        assert!(percentage_deviation(3.0, 0.0, "x").is_err());
    }

    #[test]
    fn test_single_instance_proven_by_exact_solver() {
        let s = summarize(
            "inst_a_b_0,BinP,20,5,10\n\
             inst_a_b_0,GH + HC,20,8,10,_,_,2,3,4\n",
        );
        assert_eq!(s.avg_perc_deviation.bin_packing, Stat::Number(0.0));
        assert_eq!(s.avg_perc_deviation.heuristic, Stat::Number(0.0));
        assert_eq!(s.perc_optimal.bin_packing, Stat::Number(100.0));
        assert_eq!(s.perc_optimal.heuristic, Stat::Number(100.0));
        assert_eq!(s.perc_optimal.three_index, Stat::NoData);
        assert_eq!(s.avg_optimal_runtime.heuristic, Stat::Number(8.0));
        assert_eq!(s.best_known.bin_packing, Stat::Count(1));
    }

    #[test]
    fn test_missing_solver_reports_no_data() {
        let s = summarize(
            "inst_a_b_0,BinP,20,5,10\n\
             inst_a_b_0,GH + HC,20,8,11,_,_,2,3,4\n\
             inst_a_b_1,BinP,20,6,12\n\
             inst_a_b_1,GH + HC,20,8,12,_,_,2,3,4\n",
        );
        assert_eq!(s.feasible.three_index, 0);
        assert_eq!(s.avg_cost.three_index, Stat::NoData);
        assert_eq!(s.avg_runtime.three_index, Stat::NoData);
        assert_eq!(s.avg_perc_deviation.three_index, Stat::NoData);
        assert_eq!(s.avg_optimal_runtime.three_index, Stat::NoData);
        assert_eq!(s.best_known.three_index, Stat::NoData);
        assert_eq!(s.avg_cost.bin_packing, Stat::Number(11.0));
        // heuristic: 10% off on instance 0, exact on instance 1
        assert_eq!(s.avg_perc_deviation.heuristic, Stat::Number(5.0));
        assert_eq!(s.best_known.heuristic, Stat::Count(1));
        assert_eq!(s.perc_optimal.heuristic, Stat::Number(50.0));
        assert_eq!(s.perc_optimal.bin_packing, Stat::Number(100.0));
    }

    #[test]
    fn test_unproven_instance_marks_every_solver_unknown() {
        let s = summarize(
            "inst_a_b_0,BinP,20,20,10\n\
             inst_a_b_0,3Idx,20,25,10\n\
             inst_a_b_0,GH + HC,20,1,10,_,_,2,3,4\n",
        );
        assert_eq!(s.perc_optimal, PerSolver::from_fn(|_| Stat::Unknown));
        assert_eq!(s.avg_optimal_runtime.bin_packing, Stat::NoData);
        assert_eq!(s.best_known.three_index, Stat::Count(1));
    }

    #[test]
    fn test_costs_are_matched_per_instance() {
        // exact solver missing on instance 0 must not shift its instance 1
        // result onto instance 0
        let s = summarize(
            "inst_a_b_0,GH + HC,20,1,50,_,_,2,3,4\n\
             inst_a_b_1,3Idx,20,2,20\n\
             inst_a_b_1,GH + HC,20,1,25,_,_,2,3,4\n",
        );
        assert_eq!(s.avg_perc_deviation.three_index, Stat::Number(0.0));
        assert_eq!(s.best_known.three_index, Stat::Count(1));
        // heuristic: 0% on instance 0, 25% on instance 1
        assert_eq!(s.avg_perc_deviation.heuristic, Stat::Number(12.5));
    }

    #[test]
    fn test_heuristic_and_lower_bound_extras() {
        let s = summarize(
            "inst_a_b_0,LB,-,-,8\n\
             inst_a_b_0,GH,20,0.1,12\n\
             inst_a_b_0,GH + HC,20,1.5,10,_,_,0.5,3,40\n\
             inst_a_b_1,LB,-,-,8\n\
             inst_a_b_1,GH,20,0.1,12\n\
             inst_a_b_1,GH + HC,20,2.5,10,_,_,1.5,4,60\n",
        );
        assert_eq!(s.avg_cost.heuristic, Stat::Number(10.0));
        assert_eq!(s.avg_runtime.heuristic, Stat::Number(2.0));
        assert_eq!(s.avg_improvement_percent, Stat::Number(16.67));
        assert_eq!(s.avg_iterations_to_best, Stat::Number(3.5));
        assert_eq!(s.avg_time_to_best, Stat::Number(1.0));
        assert_eq!(s.avg_total_iterations, Stat::Number(50.0));
        assert_eq!(s.avg_perc_deviation_lower_bound, Stat::Number(25.0));
    }

    #[test]
    fn test_configured_instance_count_drives_percentages() {
        let contents = format!(
            "{}\ninst_a_b_0,BinP,20,5,10\ninst_a_b_0,GH + HC,20,8,10,_,_,2,3,4\n",
            HEADER
        );
        let reduced = reduce(parse_experiment(&contents).unwrap()).unwrap();
        let config = AggregationConfig::default().with_instances_per_experiment(Some(20));
        let s = aggregate(&reduced, &config).unwrap();
        // 19 instances are missing, so their optimality is unknown
        assert_eq!(s.perc_optimal.bin_packing, Stat::Unknown);
    }

    #[test]
    fn test_missing_instance_index_marks_every_solver_unknown() {
        let gap = summarize(
            "inst_a_b_0,BinP,20,5,10\n\
             inst_a_b_0,GH + HC,20,8,10,_,_,2,3,4\n\
             inst_a_b_2,BinP,20,5,10\n\
             inst_a_b_2,GH + HC,20,8,10,_,_,2,3,4\n",
        );
        assert_eq!(gap.perc_optimal, PerSolver::from_fn(|_| Stat::Unknown));

        let late_start = summarize(
            "inst_a_b_1,BinP,20,5,10\n\
             inst_a_b_1,GH + HC,20,8,10,_,_,2,3,4\n",
        );
        assert_eq!(late_start.perc_optimal, PerSolver::from_fn(|_| Stat::Unknown));
    }

    #[test]
    fn test_configured_count_below_instances_present_is_unknown() {
        let contents = format!(
            "{}\ninst_a_b_0,BinP,20,5,10\ninst_a_b_1,BinP,20,5,10\ninst_a_b_2,BinP,20,5,10\n",
            HEADER
        );
        let reduced = reduce(parse_experiment(&contents).unwrap()).unwrap();
        let config = AggregationConfig::default().with_instances_per_experiment(Some(2));
        let s = aggregate(&reduced, &config).unwrap();
        assert_eq!(s.perc_optimal.bin_packing, Stat::Unknown);
    }

    #[test]
    fn test_repeated_record_counts_against_best_known() {
        // the earlier, cheaper BinP record is overwritten but still sets the
        // best known cost
        let s = summarize(
            "inst_a_b_0,BinP,20,1,8\n\
             inst_a_b_0,BinP,20,2,12\n\
             inst_a_b_0,GH + HC,20,1,10,_,_,2,3,4\n",
        );
        assert_eq!(s.avg_cost.bin_packing, Stat::Number(12.0));
        assert_eq!(s.best_known.bin_packing, Stat::Count(0));
        assert_eq!(s.best_known.heuristic, Stat::Count(0));
        assert_eq!(s.avg_perc_deviation.bin_packing, Stat::Number(50.0));
        assert_eq!(s.perc_optimal.bin_packing, Stat::Number(0.0));
    }
}
