//! # UmojaMath Simulator Engine
//!
//! Calculation engine for the UmojaMath tutoring business simulator, an
//! educational tool that shows how precalculus models a small online
//! tutoring company.
//!
//! Every section of the simulator evaluates a closed-form model from numeric
//! parameters and returns chart-ready data (`{label, x, y}` series, markers
//! and reference lines) for a presentation layer to draw.
//!
//! ## Features
//!
//! - **Pricing**: Piecewise-linear tier pricing, graduated or volume billing
//! - **Advertising**: Saturating exponential reach, inverse budget lookups, CPM costing
//! - **Scheduling**: Tutor/subject assignment as a linear program
//! - **Profit**: Quadratic profit curve, break-even counts and optimum
//! - **Seasonality**: Sinusoidal enrollment with an optional second harmonic
//! - **HTTP API**: JSON endpoints for any front end
//!
//! ## Architecture
//!
//! - [`models`]: Validated parameter bundles
//! - [`services`]: Evaluators and dataset builders
//! - [`solver`]: LP model and the bundled simplex solver
//! - [`routes`]: Route-specific DTOs and route name constants
//! - [`api`]: Re-exports of every DTO
//! - [`config`]: TOML configuration with built-in defaults
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ```
//! use umoja_sim::models::PricingSchedule;
//!
//! let schedule = PricingSchedule::standard();
//! assert_eq!(schedule.cost(8.0).unwrap(), 234.0);
//! ```

// Allow large error types - SimError carries structured context for callers
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod solver;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ErrorContext, SimError, SimResult};
