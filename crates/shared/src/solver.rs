use std::fmt;
use std::ops::{Index, IndexMut};

/// Category of a single result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverTag {
    /// Exact solver on the bin-packing formulation.
    BinPacking,
    /// Exact solver on the three-index formulation.
    ThreeIndex,
    /// Constructive heuristic followed by hill climbing.
    HeuristicFinal,
    /// Constructive heuristic alone (the local search starting point).
    HeuristicInitial,
    LowerBound,
}

impl SolverTag {
    pub const ALL: [SolverTag; 5] = [
        SolverTag::BinPacking,
        SolverTag::ThreeIndex,
        SolverTag::HeuristicFinal,
        SolverTag::HeuristicInitial,
        SolverTag::LowerBound,
    ];

    /// Label written by the experiment runs for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::BinPacking => "BinP",
            Self::ThreeIndex => "3Idx",
            Self::HeuristicFinal => "GH + HC",
            Self::HeuristicInitial => "GH",
            Self::LowerBound => "LB",
        }
    }

    /// The compared solver this record belongs to, if any.
    pub fn solver(self) -> Option<Solver> {
        match self {
            Self::BinPacking => Some(Solver::BinPacking),
            Self::ThreeIndex => Some(Solver::ThreeIndex),
            Self::HeuristicFinal => Some(Solver::Heuristic),
            Self::HeuristicInitial | Self::LowerBound => None,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Self::BinPacking | Self::ThreeIndex)
    }
}

impl fmt::Display for SolverTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three solvers compared in a summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    BinPacking,
    ThreeIndex,
    Heuristic,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::BinPacking, Solver::ThreeIndex, Solver::Heuristic];

    /// Column suffix used in the summary header.
    pub fn column_suffix(self) -> &'static str {
        match self {
            Self::BinPacking => "BinP",
            Self::ThreeIndex => "3Idx",
            Self::Heuristic => "HC",
        }
    }

    pub fn is_exact(self) -> bool {
        !matches!(self, Self::Heuristic)
    }
}

/// A value for each compared solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerSolver<T> {
    pub bin_packing: T,
    pub three_index: T,
    pub heuristic: T,
}

impl<T> PerSolver<T> {
    pub fn from_fn(mut f: impl FnMut(Solver) -> T) -> Self {
        Self {
            bin_packing: f(Solver::BinPacking),
            three_index: f(Solver::ThreeIndex),
            heuristic: f(Solver::Heuristic),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Solver, &T) -> U) -> PerSolver<U> {
        PerSolver::from_fn(|solver| f(solver, &self[solver]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Solver, &T)> {
        Solver::ALL.into_iter().map(move |solver| (solver, &self[solver]))
    }
}

impl<T> Index<Solver> for PerSolver<T> {
    type Output = T;

    fn index(&self, solver: Solver) -> &T {
        match solver {
            Solver::BinPacking => &self.bin_packing,
            Solver::ThreeIndex => &self.three_index,
            Solver::Heuristic => &self.heuristic,
        }
    }
}

impl<T> IndexMut<Solver> for PerSolver<T> {
    fn index_mut(&mut self, solver: Solver) -> &mut T {
        match solver {
            Solver::BinPacking => &mut self.bin_packing,
            Solver::ThreeIndex => &mut self.three_index,
            Solver::Heuristic => &mut self.heuristic,
        }
    }
}
