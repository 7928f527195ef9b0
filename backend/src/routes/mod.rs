pub mod advertising;
pub mod chart;
pub mod overview;
pub mod pricing;
pub mod profit;
pub mod scheduling;
pub mod seasonality;
