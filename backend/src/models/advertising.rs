use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::services::numeric::{ensure_non_negative, ensure_positive};

const OPERATION: &str = "advertising.scenario";

fn default_cpm() -> f64 {
    5.0
}

/// Advertising campaign parameters.
///
/// Reach follows the saturating curve `max_reach * (1 - e^(-growth_rate * spend))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisingScenario {
    /// Campaign spend in dollars
    pub budget: f64,
    /// Audience ceiling the curve approaches
    pub max_reach: f64,
    /// Growth constant `k` per dollar spent
    pub growth_rate: f64,
    /// Cost per thousand impressions
    #[serde(default = "default_cpm")]
    pub cpm: f64,
}

impl AdvertisingScenario {
    pub fn new(budget: f64, max_reach: f64, growth_rate: f64) -> SimResult<Self> {
        let scenario = Self {
            budget,
            max_reach,
            growth_rate,
            cpm: default_cpm(),
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn with_cpm(mut self, cpm: f64) -> SimResult<Self> {
        self.cpm = ensure_positive(cpm, "cpm", OPERATION)?;
        Ok(self)
    }

    pub fn with_budget(mut self, budget: f64) -> SimResult<Self> {
        self.budget = ensure_non_negative(budget, "budget", OPERATION)?;
        Ok(self)
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_non_negative(self.budget, "budget", OPERATION)?;
        ensure_non_negative(self.max_reach, "max_reach", OPERATION)?;
        ensure_non_negative(self.growth_rate, "growth_rate", OPERATION)?;
        ensure_positive(self.cpm, "cpm", OPERATION)?;
        Ok(())
    }
}

impl Default for AdvertisingScenario {
    fn default() -> Self {
        Self {
            budget: 200.0,
            max_reach: 5000.0,
            growth_rate: 0.01,
            cpm: default_cpm(),
        }
    }
}
