//! Dense two-phase simplex.
//!
//! Rows are normalized to non-negative right-hand sides, then slack, surplus
//! and artificial columns are appended. Phase one minimizes the artificial
//! sum to find a feasible basis; phase two minimizes the model objective.
//! Bland's rule picks entering and leaving columns, so degenerate problems
//! cannot cycle.

use log::trace;

use super::model::{ConstrType, LpModel};
use super::{LpOutcome, LpSolution, LpSolver};
use crate::error::{ErrorContext, SimError, SimResult};

/// Simplex solver for small dense problems.
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    /// Values with magnitude below this are treated as zero
    pub tolerance: f64,
    /// Pivot limit per phase
    pub max_iterations: usize,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 10_000,
        }
    }
}

enum PhaseResult {
    Optimal,
    Unbounded,
}

struct Tableau {
    /// Constraint rows; the last entry of each row is the right-hand side.
    rows: Vec<Vec<f64>>,
    basis: Vec<usize>,
    n_structural: usize,
    artificial_start: usize,
    width: usize,
}

impl Tableau {
    fn build(model: &LpModel) -> Self {
        let n = model.num_vars();
        let constrs = model.constrs();

        let normalized: Vec<(Vec<(f64, usize)>, ConstrType, f64)> = constrs
            .iter()
            .map(|c| {
                let cols: Vec<(f64, usize)> = c.cols.iter().copied().collect();
                if c.rhs < 0.0 {
                    let typ = match c.typ {
                        ConstrType::LessEqual => ConstrType::GreaterEqual,
                        ConstrType::GreaterEqual => ConstrType::LessEqual,
                        ConstrType::Equal => ConstrType::Equal,
                    };
                    (cols.into_iter().map(|(a, j)| (-a, j)).collect(), typ, -c.rhs)
                } else {
                    (cols, c.typ, c.rhs)
                }
            })
            .collect();

        let n_slack = normalized
            .iter()
            .filter(|(_, typ, _)| *typ != ConstrType::Equal)
            .count();
        let n_artificial = normalized
            .iter()
            .filter(|(_, typ, _)| *typ != ConstrType::LessEqual)
            .count();
        let width = n + n_slack + n_artificial;

        let mut rows = vec![vec![0.0; width + 1]; normalized.len()];
        let mut basis = vec![0; normalized.len()];
        let mut slack_col = n;
        let mut artificial_col = n + n_slack;

        for (i, (cols, typ, rhs)) in normalized.into_iter().enumerate() {
            let row = &mut rows[i];
            for (coe, var) in cols {
                row[var] += coe;
            }
            row[width] = rhs;
            match typ {
                ConstrType::LessEqual => {
                    row[slack_col] = 1.0;
                    basis[i] = slack_col;
                    slack_col += 1;
                }
                ConstrType::GreaterEqual => {
                    row[slack_col] = -1.0;
                    slack_col += 1;
                    row[artificial_col] = 1.0;
                    basis[i] = artificial_col;
                    artificial_col += 1;
                }
                ConstrType::Equal => {
                    row[artificial_col] = 1.0;
                    basis[i] = artificial_col;
                    artificial_col += 1;
                }
            }
        }

        Self {
            rows,
            basis,
            n_structural: n,
            artificial_start: n + n_slack,
            width,
        }
    }

    fn has_artificials(&self) -> bool {
        self.artificial_start < self.width
    }

    /// Reduced-cost row for `costs` under the current basis; the last entry
    /// holds minus the objective value.
    fn reduced_costs(&self, costs: &[f64]) -> Vec<f64> {
        let mut obj = vec![0.0; self.width + 1];
        obj[..self.width].copy_from_slice(costs);
        for (row, &b) in self.rows.iter().zip(&self.basis) {
            let cb = costs[b];
            if cb != 0.0 {
                for (o, v) in obj.iter_mut().zip(row) {
                    *o -= cb * v;
                }
            }
        }
        obj
    }

    fn pivot(&mut self, row: usize, col: usize, obj: &mut [f64]) {
        let p = self.rows[row][col];
        for v in self.rows[row].iter_mut() {
            *v /= p;
        }
        let pivot_row = self.rows[row].clone();
        for (i, r) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = r[col];
            if factor != 0.0 {
                for (v, pv) in r.iter_mut().zip(&pivot_row) {
                    *v -= factor * pv;
                }
            }
        }
        let factor = obj[col];
        if factor != 0.0 {
            for (v, pv) in obj.iter_mut().zip(&pivot_row) {
                *v -= factor * pv;
            }
        }
        self.basis[row] = col;
    }

    fn optimize(
        &mut self,
        obj: &mut [f64],
        allowed_columns: usize,
        solver: &SimplexSolver,
        phase: &str,
    ) -> SimResult<PhaseResult> {
        let tol = solver.tolerance;
        for iteration in 0..solver.max_iterations {
            let Some(col) = (0..allowed_columns).find(|&j| obj[j] < -tol) else {
                trace!("simplex {} optimal after {} pivots", phase, iteration);
                return Ok(PhaseResult::Optimal);
            };

            let mut leaving: Option<(usize, f64)> = None;
            for (i, row) in self.rows.iter().enumerate() {
                let a = row[col];
                if a <= tol {
                    continue;
                }
                let ratio = row[self.width] / a;
                leaving = match leaving {
                    None => Some((i, ratio)),
                    Some((best, best_ratio)) => {
                        if ratio < best_ratio - tol
                            || ((ratio - best_ratio).abs() <= tol
                                && self.basis[i] < self.basis[best])
                        {
                            Some((i, ratio))
                        } else {
                            Some((best, best_ratio))
                        }
                    }
                };
            }

            match leaving {
                Some((row, _)) => self.pivot(row, col, obj),
                None => return Ok(PhaseResult::Unbounded),
            }
        }
        Err(SimError::Solver {
            message: format!(
                "simplex {} did not converge within {} pivots",
                phase, solver.max_iterations
            ),
            context: ErrorContext::new("solver.simplex"),
        })
    }

    /// Pivot basic artificials at zero level out of the basis where possible.
    /// Rows that keep an artificial are redundant and stay inert.
    fn drive_out_artificials(&mut self, tol: f64) {
        let mut scratch = vec![0.0; self.width + 1];
        for i in 0..self.rows.len() {
            if self.basis[i] < self.artificial_start {
                continue;
            }
            if let Some(col) = (0..self.artificial_start).find(|&j| self.rows[i][j].abs() > tol) {
                self.pivot(i, col, &mut scratch);
            }
        }
    }

    fn structural_values(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.n_structural];
        for (row, &b) in self.rows.iter().zip(&self.basis) {
            if b < self.n_structural {
                values[b] = row[self.width];
            }
        }
        values
    }
}

impl LpSolver for SimplexSolver {
    fn solve(&self, model: &LpModel) -> SimResult<LpOutcome> {
        let mut tableau = Tableau::build(model);
        trace!(
            "simplex on {}: {} rows, {} columns",
            model.name(),
            tableau.rows.len(),
            tableau.width
        );

        if tableau.has_artificials() {
            let mut costs = vec![0.0; tableau.width];
            for c in costs.iter_mut().skip(tableau.artificial_start) {
                *c = 1.0;
            }
            let mut obj = tableau.reduced_costs(&costs);
            let width = tableau.width;
            if let PhaseResult::Unbounded = tableau.optimize(&mut obj, width, self, "phase 1")? {
                return Err(SimError::solver("phase 1 reported an unbounded auxiliary problem"));
            }

            let infeasibility = -obj[width];
            let scale: f64 = 1.0 + tableau.rows.iter().map(|r| r[width].abs()).sum::<f64>();
            if infeasibility > 1e-7 * scale {
                return Ok(LpOutcome::Infeasible);
            }
            tableau.drive_out_artificials(self.tolerance);
        }

        let mut costs = vec![0.0; tableau.width];
        costs[..tableau.n_structural].copy_from_slice(&model.objective_coefficients());
        let mut obj = tableau.reduced_costs(&costs);
        let allowed = tableau.artificial_start;
        if let PhaseResult::Unbounded = tableau.optimize(&mut obj, allowed, self, "phase 2")? {
            return Ok(LpOutcome::Unbounded);
        }

        let values: Vec<f64> = tableau
            .structural_values()
            .into_iter()
            .map(|v| if v.abs() < 1e-9 { 0.0 } else { v })
            .collect();
        let objective = model.objective_value(&values);
        Ok(LpOutcome::Optimal(LpSolution { values, objective }))
    }
}
