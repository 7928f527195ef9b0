use log::debug;

use crate::api::{ChartMarker, ChartSeries, ProfitData, ProfitPoint, ReferenceLine};
use crate::error::SimResult;
use crate::models::ProfitModel;
use crate::services::numeric::{ensure_non_negative, ensure_points, linspace};

const OPERATION: &str = "profit.evaluate";

/// Roots closer than this are reported once.
const ROOT_EPSILON: f64 = 1e-9;

impl ProfitModel {
    pub fn revenue(&self, students: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_non_negative(students, "students", OPERATION)?;
        Ok(self.price_per_student * students)
    }

    pub fn expenses(&self, students: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_non_negative(students, "students", OPERATION)?;
        Ok(self.fixed_cost
            + self.variable_cost_per_student * students
            + self.scaling_factor * students * students)
    }

    pub fn profit(&self, students: f64) -> SimResult<f64> {
        Ok(self.revenue(students)? - self.expenses(students)?)
    }

    pub fn point(&self, students: f64) -> SimResult<ProfitPoint> {
        let revenue = self.revenue(students)?;
        let expenses = self.expenses(students)?;
        Ok(ProfitPoint {
            students,
            revenue,
            expenses,
            profit: revenue - expenses,
        })
    }

    /// Student count maximizing profit, `(price - variable) / (2 * scaling)`
    /// clamped at zero. Linear profit has no interior optimum.
    pub fn optimal_students(&self) -> Option<f64> {
        let (a, b, _) = self.coefficients();
        if a < 0.0 {
            Some((-b / (2.0 * a)).max(0.0))
        } else {
            None
        }
    }

    pub fn max_profit(&self) -> Option<f64> {
        self.optimal_students()
            .and_then(|students| self.profit(students).ok())
    }

    /// Strictly positive student counts where profit crosses zero, ascending.
    pub fn break_even(&self) -> Vec<f64> {
        let (a, b, c) = self.coefficients();

        let mut roots = if a == 0.0 {
            if b > 0.0 {
                vec![-c / b]
            } else {
                Vec::new()
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                Vec::new()
            } else {
                // q-form avoids cancellation between b and sqrt(disc)
                let q = -0.5 * (b + b.signum() * discriminant.sqrt());
                if q == 0.0 {
                    vec![0.0]
                } else {
                    vec![q / a, c / q]
                }
            }
        };

        roots.retain(|r| r.is_finite() && *r > 0.0);
        roots.sort_by(|x, y| x.total_cmp(y));
        roots.dedup_by(|x, y| (*x - *y).abs() < ROOT_EPSILON);
        roots
    }

    /// Human-readable profit polynomial, e.g. `P(s) = -0.5s^2 + 150s - 2000`.
    pub fn formula(&self) -> String {
        let (a, b, c) = self.coefficients();
        let mut out = String::from("P(s) =");
        let mut first = true;
        for (coefficient, suffix) in [(a, "s^2"), (b, "s"), (c, "")] {
            if coefficient == 0.0 && !(suffix.is_empty() && first) {
                continue;
            }
            let magnitude = coefficient.abs();
            if first {
                let sign = if coefficient < 0.0 { "-" } else { "" };
                out.push_str(&format!(" {}{}{}", sign, magnitude, suffix));
                first = false;
            } else {
                let sign = if coefficient < 0.0 { '-' } else { '+' };
                out.push_str(&format!(" {} {}{}", sign, magnitude, suffix));
            }
        }
        out
    }
}

/// Build the profit dataset over `[0, max_students]`.
pub fn compute_profit_data(
    model: &ProfitModel,
    students: f64,
    max_students: f64,
    points: usize,
) -> SimResult<ProfitData> {
    model.validate()?;
    ensure_non_negative(max_students, "max_students", OPERATION)?;
    ensure_points(points, OPERATION)?;

    let current = model.point(students)?;
    let xs = linspace(0.0, max_students, points);
    let revenue_curve = ChartSeries::from_fn("Revenue", xs.clone(), |s| model.revenue(s))?;
    let expense_curve = ChartSeries::from_fn("Expenses", xs.clone(), |s| model.expenses(s))?;
    let profit_curve = ChartSeries::from_fn("Profit", xs, |s| model.profit(s))?;

    let break_even = model.break_even();
    let optimal_students = model.optimal_students();
    let max_profit = model.max_profit();

    let mut markers = vec![ChartMarker::new(
        "Current Position",
        current.students,
        current.profit,
    )];
    if let (Some(n), Some(p)) = (optimal_students, max_profit) {
        markers.push(ChartMarker::new("Optimal Point", n, p));
    }
    markers.extend(
        break_even
            .iter()
            .map(|&n| ChartMarker::new("Break-even", n, 0.0)),
    );

    let break_even_lines = break_even
        .iter()
        .enumerate()
        .map(|(i, &n)| ReferenceLine::vertical(format!("Break-even {}", i + 1), n))
        .collect();

    debug!(
        "Profit: {} students -> ${:.2}; break-even {:?}, optimum {:?}",
        students, current.profit, break_even, optimal_students
    );

    Ok(ProfitData {
        model: model.clone(),
        formula: model.formula(),
        current,
        break_even,
        optimal_students,
        max_profit,
        revenue_curve,
        expense_curve,
        profit_curve,
        markers,
        break_even_lines,
    })
}
