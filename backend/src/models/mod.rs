//! Parameter bundles for the five business models.
//!
//! Each bundle is immutable input: built from user parameters, evaluated by the
//! matching module in [`crate::services`], then discarded. Constructors and
//! `validate()` enforce the domain of every parameter.

pub mod advertising;
pub mod pricing;
pub mod profit;
pub mod scheduling;
pub mod seasonality;

pub use advertising::AdvertisingScenario;
pub use pricing::{PricingMode, PricingSchedule, PricingTier};
pub use profit::ProfitModel;
pub use scheduling::{ScheduleMode, SchedulingProblem, Subject, Tutor};
pub use seasonality::{Harmonic, SeasonalityModel};
