use solver_compare_shared::{PerSolver, SolverTag};

use crate::error::ReduceError;
use crate::parser::{HeuristicProgress, ParsedExperiment, RawRecord};

/// Everything recorded for one instance of an experiment file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceResult {
    pub index: usize,
    pub costs: PerSolver<Option<f64>>,
    pub runtimes: PerSolver<Option<f64>>,
    pub progress: Option<HeuristicProgress>,
    pub initial_costs: Vec<f64>,
    pub lower_bounds: Vec<f64>,
    /// Minimum cost among the compared solvers. `None` if none of them
    /// reported a solution for this instance.
    pub best_cost: Option<f64>,
    /// An exact solver finished strictly below the time limit.
    pub proven_optimal: bool,
}

impl InstanceResult {
    fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    fn absorb(&mut self, record: &RawRecord, time_limit: f64) {
        let Some(solver) = record.tag.solver() else {
            if record.tag == SolverTag::HeuristicInitial {
                self.initial_costs.push(record.cost);
            } else {
                self.lower_bounds.push(record.cost);
            }
            return;
        };
        if self.costs[solver].is_some() {
            log::warn!(
                "line {}: second {} record for instance {}, keeping the later one",
                record.line,
                record.tag,
                self.index
            );
        }
        self.costs[solver] = Some(record.cost);
        self.runtimes[solver] = record.runtime;
        self.best_cost = Some(self.best_cost.map_or(record.cost, |b| b.min(record.cost)));
        if record.tag.is_exact() && record.runtime.is_some_and(|r| r < time_limit) {
            self.proven_optimal = true;
        }
        if record.progress.is_some() {
            self.progress = record.progress;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReducedExperiment {
    pub instance_type: String,
    pub time_limit: f64,
    /// One entry per distinct instance index, in file order.
    pub instances: Vec<InstanceResult>,
}

impl ReducedExperiment {
    pub fn best_costs(&self) -> Vec<Option<f64>> {
        self.instances.iter().map(|inst| inst.best_cost).collect()
    }

    /// One past the highest instance index, i.e. the instance count implied
    /// by 0-based indexing.
    pub fn index_span(&self) -> usize {
        self.instances.last().map_or(0, |inst| inst.index + 1)
    }

    /// Every index in `0..expected` is present, proven optimal, and nothing
    /// lies beyond it.
    pub fn proven_through(&self, expected: usize) -> bool {
        expected > 0
            && self.instances.len() == expected
            && self
                .instances
                .iter()
                .enumerate()
                .all(|(i, inst)| inst.index == i && inst.proven_optimal)
    }
}

/// Groups records by instance. A change of instance index closes the
/// running best cost of the previous instance.
pub fn reduce(parsed: ParsedExperiment) -> Result<ReducedExperiment, ReduceError> {
    let ParsedExperiment {
        instance_type,
        time_limit,
        records,
    } = parsed;

    let mut instances = Vec::new();
    let mut current: Option<InstanceResult> = None;

    for record in &records {
        let starts_new = match &current {
            Some(inst) if inst.index == record.instance_index => false,
            Some(inst) if record.instance_index < inst.index => {
                return Err(ReduceError::UnorderedInstances {
                    line: record.line,
                    current: inst.index,
                    found: record.instance_index,
                });
            }
            _ => true,
        };
        if starts_new {
            if let Some(done) = current.replace(InstanceResult::new(record.instance_index)) {
                instances.push(done);
            }
        }
        if let Some(inst) = current.as_mut() {
            inst.absorb(record, time_limit);
        }
    }
    instances.extend(current);

    log::debug!(
        "{}: reduced {} records into {} instances",
        instance_type,
        records.len(),
        instances.len()
    );

    Ok(ReducedExperiment {
        instance_type,
        time_limit,
        instances,
    })
}
