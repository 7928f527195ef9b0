use serde::{Deserialize, Serialize};

use crate::api::{ChartMarker, ChartSeries, ReferenceLine};
use crate::error::SimResult;
use crate::models::AdvertisingScenario;

// =========================================================
// Advertising types + route
// =========================================================

/// Complete advertising campaign dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisingData {
    pub scenario: AdvertisingScenario,
    /// People reached at the scenario budget
    pub reach: f64,
    /// `reach / max_reach`
    pub saturation: f64,
    /// Spend needed for one more customer at the current budget; `None` once
    /// the curve is flat
    pub marginal_cost_per_customer: Option<f64>,
    /// `budget / reach`; `None` while nobody has been reached
    pub average_cost_per_customer: Option<f64>,
    pub target_fraction: f64,
    pub target_reach: f64,
    /// Spend needed to reach the target; `None` when unreachable
    pub budget_for_target: Option<f64>,
    /// Impression cost of the current reach at the scenario CPM
    pub impression_cost: f64,
    /// Impressions the budget buys outright at the scenario CPM
    pub budget_capped_reach: f64,
    pub reach_curve: ChartSeries,
    pub target_line: ReferenceLine,
    pub current: ChartMarker,
}

/// Route function name constant for advertising data
pub const GET_ADVERTISING_DATA: &str = "get_advertising_data";

/// Get advertising visualization data (wraps service call)
pub fn get_advertising_data(
    scenario: &AdvertisingScenario,
    target_fraction: f64,
    max_budget: f64,
    points: usize,
) -> SimResult<AdvertisingData> {
    crate::services::advertising::compute_advertising_data(
        scenario,
        target_fraction,
        max_budget,
        points,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_advertising_data_wraps_service() {
        let data =
            get_advertising_data(&AdvertisingScenario::default(), 0.8, 1000.0, 50).unwrap();
        assert_eq!(data.reach_curve.len(), 50);
        assert_eq!(data.target_fraction, 0.8);
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_ADVERTISING_DATA, "get_advertising_data");
    }
}
