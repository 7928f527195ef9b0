use serde::{Deserialize, Serialize};

use crate::api::{ChartMarker, ChartSeries, ReferenceLine, SummaryStats};
use crate::error::SimResult;
use crate::models::SeasonalityModel;

// =========================================================
// Seasonality types + route
// =========================================================

/// How the extrema were located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremaMethod {
    /// Closed form from the zero of the sinusoid's derivative
    Analytic,
    /// Dense sampling with parabolic refinement
    Sampled,
}

/// Peak and trough over one period `[0, period)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalExtrema {
    pub peak_time: f64,
    pub peak_value: f64,
    pub trough_time: f64,
    pub trough_value: f64,
    pub method: ExtremaMethod,
}

/// Enrollment estimate for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEnrollment {
    pub month: u32,
    pub name: String,
    pub enrollment: f64,
}

/// Month-by-month view of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub months: Vec<MonthlyEnrollment>,
    pub peak: MonthlyEnrollment,
    pub trough: MonthlyEnrollment,
    pub stats: SummaryStats,
}

/// Complete seasonality dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityData {
    pub model: SeasonalityModel,
    pub month: f64,
    pub enrollment: f64,
    pub curve: ChartSeries,
    pub monthly_values: ChartSeries,
    pub extrema: Option<SeasonalExtrema>,
    pub summary: MonthlySummary,
    pub baseline_line: ReferenceLine,
    pub current: ChartMarker,
}

/// Route function name constant for seasonality data
pub const GET_SEASONALITY_DATA: &str = "get_seasonality_data";

/// Get seasonality visualization data (wraps service call)
pub fn get_seasonality_data(
    model: &SeasonalityModel,
    month: f64,
    points: usize,
) -> SimResult<SeasonalityData> {
    crate::services::seasonality::compute_seasonality_data(model, month, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_seasonality_data_wraps_service() {
        let data = get_seasonality_data(&SeasonalityModel::default(), 9.0, 100).unwrap();
        assert_eq!(data.curve.len(), 100);
        assert_eq!(data.monthly_values.len(), 12);
        assert_eq!(data.summary.months.len(), 12);
    }

    #[test]
    fn test_extrema_method_serialization() {
        assert_eq!(
            serde_json::to_value(ExtremaMethod::Analytic).unwrap(),
            "analytic"
        );
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_SEASONALITY_DATA, "get_seasonality_data");
    }
}
