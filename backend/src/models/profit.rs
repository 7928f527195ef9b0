use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::services::numeric::ensure_non_negative;

const OPERATION: &str = "profit.model";

/// Monthly cost and revenue structure.
///
/// `expenses(n) = fixed_cost + variable_cost_per_student * n + scaling_factor * n^2`
/// and `revenue(n) = price_per_student * n`. A zero `scaling_factor` makes
/// profit linear in the student count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitModel {
    pub fixed_cost: f64,
    pub variable_cost_per_student: f64,
    pub price_per_student: f64,
    /// Congestion cost growing with the square of the student count
    #[serde(default)]
    pub scaling_factor: f64,
}

impl ProfitModel {
    pub fn new(
        fixed_cost: f64,
        variable_cost_per_student: f64,
        price_per_student: f64,
        scaling_factor: f64,
    ) -> SimResult<Self> {
        let model = Self {
            fixed_cost,
            variable_cost_per_student,
            price_per_student,
            scaling_factor,
        };
        model.validate()?;
        Ok(model)
    }

    /// Linear cost model with no congestion term.
    pub fn linear(
        fixed_cost: f64,
        variable_cost_per_student: f64,
        price_per_student: f64,
    ) -> SimResult<Self> {
        Self::new(fixed_cost, variable_cost_per_student, price_per_student, 0.0)
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_non_negative(self.fixed_cost, "fixed_cost", OPERATION)?;
        ensure_non_negative(
            self.variable_cost_per_student,
            "variable_cost_per_student",
            OPERATION,
        )?;
        ensure_non_negative(self.price_per_student, "price_per_student", OPERATION)?;
        ensure_non_negative(self.scaling_factor, "scaling_factor", OPERATION)?;
        Ok(())
    }

    /// Coefficients `(a, b, c)` of `profit(n) = a*n^2 + b*n + c`.
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (
            -self.scaling_factor,
            self.price_per_student - self.variable_cost_per_student,
            -self.fixed_cost,
        )
    }

    pub fn is_quadratic(&self) -> bool {
        self.scaling_factor > 0.0
    }
}

impl Default for ProfitModel {
    fn default() -> Self {
        Self {
            fixed_cost: 2000.0,
            variable_cost_per_student: 50.0,
            price_per_student: 200.0,
            scaling_factor: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_coefficients() {
        let (a, b, c) = ProfitModel::default().coefficients();
        assert_eq!(a, -0.5);
        assert_eq!(b, 150.0);
        assert_eq!(c, -2000.0);
    }

    #[test]
    fn test_validation() {
        assert!(ProfitModel::new(2000.0, 50.0, 200.0, 0.5).is_ok());
        assert!(ProfitModel::new(-1.0, 50.0, 200.0, 0.5).is_err());
        assert!(ProfitModel::new(2000.0, 50.0, 200.0, -0.5).is_err());
        assert!(!ProfitModel::linear(100.0, 10.0, 20.0).unwrap().is_quadratic());
    }
}
