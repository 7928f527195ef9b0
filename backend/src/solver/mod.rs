//! Linear-programming collaborator for the scheduling optimizer.
//!
//! Callers describe a problem with [`LpModel`] (minimize `c·x` subject to
//! linear rows, `x >= 0`) and hand it to any [`LpSolver`]. The crate ships
//! [`SimplexSolver`]; another routine can be plugged in by implementing the
//! trait.

pub mod model;
pub mod simplex;

pub use model::{Cols, ConstrType, Constr, LpModel};
pub use simplex::SimplexSolver;

use crate::error::SimResult;

/// Optimal point of an [`LpModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Value of every variable, indexed like [`LpModel::add_var`] results
    pub values: Vec<f64>,
    /// Objective value at `values`
    pub objective: f64,
}

/// What the solver found.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    Optimal(LpSolution),
    /// No point satisfies every row.
    Infeasible,
    /// The objective decreases without bound.
    Unbounded,
}

/// Contract every LP routine must satisfy.
pub trait LpSolver {
    fn solve(&self, model: &LpModel) -> SimResult<LpOutcome>;
}
