//! Public API surface for the simulator engine.
//!
//! This file consolidates the DTO types returned by the library and the HTTP
//! API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::advertising::AdvertisingData;
pub use crate::routes::chart::Axis;
pub use crate::routes::chart::BarSeries;
pub use crate::routes::chart::ChartMarker;
pub use crate::routes::chart::ChartSeries;
pub use crate::routes::chart::ReferenceLine;
pub use crate::routes::chart::SummaryStats;
pub use crate::routes::overview::ConceptModule;
pub use crate::routes::overview::OverviewData;
pub use crate::routes::pricing::PricingData;
pub use crate::routes::pricing::PricingQuote;
pub use crate::routes::profit::ProfitData;
pub use crate::routes::profit::ProfitPoint;
pub use crate::routes::scheduling::Assignment;
pub use crate::routes::scheduling::AssignmentCell;
pub use crate::routes::scheduling::ScheduleData;
pub use crate::routes::scheduling::SubjectCoverage;
pub use crate::routes::scheduling::TutorLoad;
pub use crate::routes::seasonality::ExtremaMethod;
pub use crate::routes::seasonality::MonthlyEnrollment;
pub use crate::routes::seasonality::MonthlySummary;
pub use crate::routes::seasonality::SeasonalExtrema;
pub use crate::routes::seasonality::SeasonalityData;

pub use crate::models::{
    AdvertisingScenario, Harmonic, PricingMode, PricingSchedule, PricingTier, ProfitModel,
    ScheduleMode, SchedulingProblem, SeasonalityModel, Subject, Tutor,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_series_json_shape() {
        let mut series = ChartSeries::new("Reach Curve");
        series.push(0.0, 0.0);
        series.push(100.0, 3160.6);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["label"], "Reach Curve");
        assert_eq!(json["x"].as_array().unwrap().len(), 2);
        assert_eq!(json["y"][1], 3160.6);
    }

    #[test]
    fn test_pricing_quote_roundtrip() {
        let quote = PricingSchedule::standard().quote(8.0).unwrap();
        let json = serde_json::to_string(&quote).unwrap();
        let back: PricingQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tier_index, 1);
        assert_eq!(back.mode, PricingMode::Graduated);
    }

    #[test]
    fn test_schedule_mode_json() {
        assert_eq!(
            serde_json::to_value(ScheduleMode::BestEffort).unwrap(),
            "best_effort"
        );
    }
}
