//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are the route DTOs re-exported here. Query structs keep
//! every field optional; handlers fill gaps from the loaded configuration.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Advertising
    AdvertisingData,
    // Overview
    OverviewData,
    // Pricing
    PricingData, PricingQuote,
    // Profit
    ProfitData, ProfitPoint,
    // Scheduling
    Assignment, ScheduleData,
    // Seasonality
    SeasonalityData,
};
use crate::models::{PricingMode, ScheduleMode, SchedulingProblem};

/// Query parameters for the pricing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricingQuery {
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub max_hours: Option<f64>,
    #[serde(default)]
    pub points: Option<usize>,
    #[serde(default)]
    pub mode: Option<PricingMode>,
}

/// Query parameters for the advertising endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdvertisingQuery {
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub max_reach: Option<f64>,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub cpm: Option<f64>,
    #[serde(default)]
    pub target_fraction: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub points: Option<usize>,
}

/// Query parameters for the profit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfitQuery {
    #[serde(default)]
    pub students: Option<f64>,
    #[serde(default)]
    pub fixed_cost: Option<f64>,
    #[serde(default)]
    pub variable_cost: Option<f64>,
    #[serde(default)]
    pub scaling_factor: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub max_students: Option<f64>,
    #[serde(default)]
    pub points: Option<usize>,
}

/// Query parameters for the seasonality endpoint.
///
/// `harmonic_amplitude=0` switches the second harmonic off.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeasonalityQuery {
    #[serde(default)]
    pub month: Option<f64>,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub phase: Option<f64>,
    #[serde(default)]
    pub harmonic_amplitude: Option<f64>,
    #[serde(default)]
    pub harmonic_period: Option<f64>,
    #[serde(default)]
    pub harmonic_phase: Option<f64>,
    #[serde(default)]
    pub points: Option<usize>,
}

/// Request body for `POST /v1/scheduling`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub problem: SchedulingProblem,
    #[serde(default)]
    pub mode: Option<ScheduleMode>,
}

/// Query parameters for `GET /v1/scheduling`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleQuery {
    #[serde(default)]
    pub mode: Option<ScheduleMode>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
