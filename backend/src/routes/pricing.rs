use serde::{Deserialize, Serialize};

use crate::api::{ChartMarker, ChartSeries, ReferenceLine};
use crate::error::SimResult;
use crate::models::{PricingMode, PricingSchedule, PricingTier};

// =========================================================
// Pricing types + route
// =========================================================

/// Price of a monthly plan of `hours` hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingQuote {
    pub hours: qtty::Hours,
    pub cost: f64,
    /// `cost / hours` (the first tier's rate for an empty plan)
    pub effective_rate: f64,
    /// Price of the next hour
    pub marginal_rate: f64,
    pub tier_index: usize,
    pub tier_label: String,
    pub mode: PricingMode,
}

/// Complete pricing dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingData {
    pub quote: PricingQuote,
    pub tiers: Vec<PricingTier>,
    pub cost_curve: ChartSeries,
    pub tier_boundaries: Vec<ReferenceLine>,
    pub current: ChartMarker,
}

/// Route function name constant for pricing data
pub const GET_PRICING_DATA: &str = "get_pricing_data";

/// Get pricing visualization data (wraps service call)
pub fn get_pricing_data(
    schedule: &PricingSchedule,
    hours: f64,
    max_hours: f64,
    points: usize,
) -> SimResult<PricingData> {
    crate::services::pricing::compute_pricing_data(schedule, hours, max_hours, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_pricing_data_wraps_service() {
        let data = get_pricing_data(&PricingSchedule::standard(), 8.0, 20.0, 21).unwrap();
        assert_eq!(data.cost_curve.len(), 21);
        assert_eq!(data.tiers.len(), 3);
        assert_eq!(data.quote.tier_label, "Tier 2 (Bulk Rate)");
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_PRICING_DATA, "get_pricing_data");
    }
}
