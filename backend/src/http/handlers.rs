//! HTTP handlers for the REST API.
//!
//! Each handler merges its query with the configured defaults, builds the
//! model and delegates to the route functions.

use axum::{extract::State, Json};
use log::debug;

use super::dto::{
    AdvertisingData, AdvertisingQuery, HealthResponse, OverviewData, PricingData, PricingQuery,
    ProfitData, ProfitQuery, ScheduleData, ScheduleQuery, ScheduleRequest, SeasonalityData,
    SeasonalityQuery,
};
use super::error::AppError;
use super::extract::{ApiJson, ApiQuery};
use super::state::AppState;
use crate::models::{
    AdvertisingScenario, Harmonic, ProfitModel, ScheduleMode, SchedulingProblem,
    SeasonalityModel,
};
use crate::routes;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

/// GET /v1/overview
pub async fn get_overview() -> HandlerResult<OverviewData> {
    Ok(Json(routes::overview::get_overview_data()))
}

// =============================================================================
// Formula Endpoints
// =============================================================================

/// GET /v1/pricing
pub async fn get_pricing(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PricingQuery>,
) -> HandlerResult<PricingData> {
    let cfg = &state.config;
    let mut schedule = cfg.pricing_schedule()?;
    if let Some(mode) = query.mode {
        schedule = schedule.with_mode(mode);
    }

    let data = routes::pricing::get_pricing_data(
        &schedule,
        query.hours.unwrap_or(cfg.pricing.hours),
        query.max_hours.unwrap_or(cfg.pricing.max_hours),
        query.points.unwrap_or(cfg.chart.points),
    )?;
    Ok(Json(data))
}

/// GET /v1/advertising
pub async fn get_advertising(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AdvertisingQuery>,
) -> HandlerResult<AdvertisingData> {
    let cfg = &state.config.advertising;
    let scenario = AdvertisingScenario::new(
        query.budget.unwrap_or(cfg.budget),
        query.max_reach.unwrap_or(cfg.max_reach),
        query.growth_rate.unwrap_or(cfg.growth_rate),
    )?
    .with_cpm(query.cpm.unwrap_or(cfg.cpm))?;

    let data = routes::advertising::get_advertising_data(
        &scenario,
        query.target_fraction.unwrap_or(cfg.target_fraction),
        query.max_budget.unwrap_or(cfg.max_budget),
        query.points.unwrap_or(state.config.chart.points),
    )?;
    Ok(Json(data))
}

/// GET /v1/profit
pub async fn get_profit(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProfitQuery>,
) -> HandlerResult<ProfitData> {
    let cfg = &state.config.profit;
    let model = ProfitModel::new(
        query.fixed_cost.unwrap_or(cfg.fixed_cost),
        query.variable_cost.unwrap_or(cfg.variable_cost_per_student),
        query.price.unwrap_or(cfg.price_per_student),
        query.scaling_factor.unwrap_or(cfg.scaling_factor),
    )?;

    let data = routes::profit::get_profit_data(
        &model,
        query.students.unwrap_or(cfg.students),
        query.max_students.unwrap_or(cfg.max_students),
        query.points.unwrap_or(state.config.chart.points),
    )?;
    Ok(Json(data))
}

/// GET /v1/seasonality
pub async fn get_seasonality(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SeasonalityQuery>,
) -> HandlerResult<SeasonalityData> {
    let cfg = &state.config.seasonality;
    let period = query.period.unwrap_or(cfg.period);
    let default_harmonic = cfg.harmonic.clone().unwrap_or(Harmonic {
        amplitude: 0.0,
        period,
        phase: 0.0,
    });
    let harmonic = Harmonic {
        amplitude: query
            .harmonic_amplitude
            .unwrap_or(default_harmonic.amplitude),
        period: query.harmonic_period.unwrap_or(default_harmonic.period),
        phase: query.harmonic_phase.unwrap_or(default_harmonic.phase),
    };

    let model = SeasonalityModel {
        baseline: query.baseline.unwrap_or(cfg.baseline),
        amplitude: query.amplitude.unwrap_or(cfg.amplitude),
        period,
        phase: query.phase.unwrap_or(cfg.phase),
        harmonic: (harmonic.amplitude != 0.0).then_some(harmonic),
    };
    model.validate()?;

    let data = routes::seasonality::get_seasonality_data(
        &model,
        query.month.unwrap_or(cfg.month),
        query.points.unwrap_or(state.config.chart.points),
    )?;
    Ok(Json(data))
}

// =============================================================================
// Scheduling
// =============================================================================

/// GET /v1/scheduling
///
/// Solve the configured scheduling scenario.
pub async fn get_scheduling(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ScheduleQuery>,
) -> HandlerResult<ScheduleData> {
    let cfg = &state.config.scheduling;
    let mode = query.mode.unwrap_or(cfg.mode);
    solve_blocking(cfg.problem.clone(), mode).await
}

/// POST /v1/scheduling
///
/// Solve a caller-supplied scheduling problem.
pub async fn post_scheduling(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScheduleRequest>,
) -> HandlerResult<ScheduleData> {
    let mode = request.mode.unwrap_or(state.config.scheduling.mode);
    solve_blocking(request.problem, mode).await
}

async fn solve_blocking(problem: SchedulingProblem, mode: ScheduleMode) -> HandlerResult<ScheduleData> {
    debug!(
        "Solving schedule: {} tutors x {} subjects ({:?})",
        problem.tutors.len(),
        problem.subjects.len(),
        mode
    );
    let data = tokio::task::spawn_blocking(move || {
        routes::scheduling::get_schedule_data(&problem, mode)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Scheduling task failed: {}", e)))??;
    Ok(Json(data))
}
