//! Evaluators behind every simulator section.
//!
//! Each module extends its model type with the closed-form formulas and
//! exposes one `compute_*_data` function that assembles the chart-ready
//! dataset returned by the matching route.

pub mod advertising;
pub mod numeric;
pub mod pricing;
pub mod profit;
pub mod scheduling;
pub mod seasonality;

pub use advertising::compute_advertising_data;
pub use pricing::compute_pricing_data;
pub use profit::compute_profit_data;
pub use scheduling::{compute_schedule_data, solve_schedule, solve_schedule_with};
pub use seasonality::compute_seasonality_data;
