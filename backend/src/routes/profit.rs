use serde::{Deserialize, Serialize};

use crate::api::{ChartMarker, ChartSeries, ReferenceLine};
use crate::error::SimResult;
use crate::models::ProfitModel;

// =========================================================
// Profit types + route
// =========================================================

/// Revenue, expenses and profit at one student count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitPoint {
    pub students: f64,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Complete profit analysis dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitData {
    pub model: ProfitModel,
    /// Human-readable profit polynomial, e.g. `P(s) = -0.5s^2 + 150s - 2000`
    pub formula: String,
    pub current: ProfitPoint,
    /// Positive student counts where profit is zero, ascending
    pub break_even: Vec<f64>,
    /// Vertex of the profit parabola; `None` for linear profit
    pub optimal_students: Option<f64>,
    pub max_profit: Option<f64>,
    pub revenue_curve: ChartSeries,
    pub expense_curve: ChartSeries,
    pub profit_curve: ChartSeries,
    pub markers: Vec<ChartMarker>,
    pub break_even_lines: Vec<ReferenceLine>,
}

/// Route function name constant for profit data
pub const GET_PROFIT_DATA: &str = "get_profit_data";

/// Get profit visualization data (wraps service call)
pub fn get_profit_data(
    model: &ProfitModel,
    students: f64,
    max_students: f64,
    points: usize,
) -> SimResult<ProfitData> {
    crate::services::profit::compute_profit_data(model, students, max_students, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profit_data_wraps_service() {
        let data = get_profit_data(&ProfitModel::default(), 50.0, 200.0, 201).unwrap();
        assert_eq!(data.profit_curve.len(), 201);
        assert_eq!(data.optimal_students, Some(150.0));
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_PROFIT_DATA, "get_profit_data");
    }
}
