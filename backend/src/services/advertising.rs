use log::{debug, warn};

use crate::api::{AdvertisingData, ChartMarker, ChartSeries, ReferenceLine};
use crate::error::{ErrorContext, SimError, SimResult};
use crate::models::AdvertisingScenario;
use crate::services::numeric::{ensure_non_negative, ensure_points, linspace};

const OPERATION: &str = "advertising.reach";

impl AdvertisingScenario {
    /// People reached after spending `spend` dollars.
    pub fn reach(&self, spend: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_non_negative(spend, "budget", OPERATION)?;
        Ok(self.max_reach * (1.0 - (-self.growth_rate * spend).exp()))
    }

    /// Spend needed to reach `target` people.
    ///
    /// The curve only approaches `max_reach`, so any target at or above it is
    /// unreachable.
    pub fn budget_for_reach(&self, target: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_non_negative(target, "target_reach", OPERATION)?;
        if target == 0.0 {
            return Ok(0.0);
        }
        if target >= self.max_reach {
            return Err(SimError::invalid_input_with_context(
                format!(
                    "target reach {} is unreachable: the audience saturates at {}",
                    target, self.max_reach
                ),
                ErrorContext::new(OPERATION).with_parameter("target_reach"),
            ));
        }
        if self.growth_rate == 0.0 {
            return Err(SimError::invalid_input_with_context(
                "reach never grows with a zero growth rate",
                ErrorContext::new(OPERATION).with_parameter("growth_rate"),
            ));
        }
        Ok(-(-target / self.max_reach).ln_1p() / self.growth_rate)
    }

    /// Spend needed to reach fraction `p` of the audience ceiling.
    pub fn budget_for_fraction(&self, p: f64) -> SimResult<f64> {
        ensure_non_negative(p, "target_fraction", OPERATION)?;
        if p >= 1.0 {
            return Err(SimError::invalid_input_with_context(
                format!("target fraction must be below 1, got {}", p),
                ErrorContext::new(OPERATION).with_parameter("target_fraction"),
            ));
        }
        self.budget_for_reach(p * self.max_reach)
    }

    /// Extra spend per extra customer at `spend`, `1 / (k (max_reach - R))`.
    ///
    /// `None` when the curve is flat (zero growth or zero audience).
    pub fn marginal_cost_per_customer(&self, spend: f64) -> SimResult<Option<f64>> {
        let remaining = self.max_reach - self.reach(spend)?;
        let slope = self.growth_rate * remaining;
        Ok((slope > 0.0).then(|| 1.0 / slope))
    }

    /// `spend / reach(spend)`; `None` while nobody has been reached.
    pub fn average_cost_per_customer(&self, spend: f64) -> SimResult<Option<f64>> {
        let reach = self.reach(spend)?;
        Ok((reach > 0.0).then(|| spend / reach))
    }

    /// Cost of serving `reach` impressions at the scenario CPM.
    pub fn impression_cost(&self, reach: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_non_negative(reach, "reach", OPERATION)?;
        Ok(reach / 1000.0 * self.cpm)
    }

    /// Impressions the budget buys outright at the scenario CPM.
    pub fn budget_capped_reach(&self) -> f64 {
        self.budget / self.cpm * 1000.0
    }
}

/// Build the advertising dataset for a scenario.
///
/// The reach curve spans spend `[0, max_budget]`; the target line marks
/// `target_fraction * max_reach`.
pub fn compute_advertising_data(
    scenario: &AdvertisingScenario,
    target_fraction: f64,
    max_budget: f64,
    points: usize,
) -> SimResult<AdvertisingData> {
    scenario.validate()?;
    ensure_non_negative(max_budget, "max_budget", OPERATION)?;
    ensure_points(points, OPERATION)?;

    let reach = scenario.reach(scenario.budget)?;
    let saturation = if scenario.max_reach > 0.0 {
        reach / scenario.max_reach
    } else {
        0.0
    };

    let target_reach = target_fraction * scenario.max_reach;
    let budget_for_target = match scenario.budget_for_fraction(target_fraction) {
        Ok(budget) => Some(budget),
        Err(e) if e.is_invalid_input() && target_fraction.is_finite() && target_fraction >= 0.0 => {
            warn!("Advertising target unreachable: {}", e);
            None
        }
        Err(e) => return Err(e),
    };

    let reach_curve = ChartSeries::from_fn(
        "Reach Curve",
        linspace(0.0, max_budget, points),
        |x| scenario.reach(x),
    )?;

    debug!(
        "Advertising: ${} -> {:.1} reached ({:.1}% of {})",
        scenario.budget,
        reach,
        saturation * 100.0,
        scenario.max_reach
    );

    Ok(AdvertisingData {
        scenario: scenario.clone(),
        reach,
        saturation,
        marginal_cost_per_customer: scenario.marginal_cost_per_customer(scenario.budget)?,
        average_cost_per_customer: scenario.average_cost_per_customer(scenario.budget)?,
        target_fraction,
        target_reach,
        budget_for_target,
        impression_cost: scenario.impression_cost(reach)?,
        budget_capped_reach: scenario.budget_capped_reach(),
        reach_curve,
        target_line: ReferenceLine::horizontal(
            format!("{:.0}% Target", target_fraction * 100.0),
            target_reach,
        ),
        current: ChartMarker::new("Current Budget", scenario.budget, reach),
    })
}
