use log::debug;

use crate::api::{ChartMarker, ChartSeries, PricingData, PricingQuote, ReferenceLine};
use crate::error::SimResult;
use crate::models::{PricingMode, PricingSchedule, PricingTier};
use crate::services::numeric::{ensure_non_negative, ensure_points, linspace};

const OPERATION: &str = "pricing.cost";

impl PricingSchedule {
    /// Monthly cost of `hours` tutoring hours.
    ///
    /// Graduated mode sums each bracket at its own rate, so the curve is
    /// continuous and non-decreasing. Volume mode bills every hour at the rate
    /// of the tier holding the total, which may drop at a boundary.
    pub fn cost(&self, hours: f64) -> SimResult<f64> {
        ensure_non_negative(hours, "hours", OPERATION)?;
        let cost = match self.mode() {
            PricingMode::Graduated => graduated_cost(self.tiers(), hours),
            PricingMode::Volume => hours * self.tiers()[self.tier_index_for(hours)].rate_per_hour,
        };
        Ok(cost)
    }

    /// Index of the tier that contains `hours`. Boundaries belong to the lower tier.
    pub fn tier_index_for(&self, hours: f64) -> usize {
        self.tiers()
            .iter()
            .position(|t| hours <= t.upper_bound())
            .unwrap_or(self.tiers().len() - 1)
    }

    pub fn active_tier(&self, hours: f64) -> SimResult<&PricingTier> {
        ensure_non_negative(hours, "hours", OPERATION)?;
        Ok(&self.tiers()[self.tier_index_for(hours)])
    }

    /// Price of the next hour after `hours`.
    pub fn marginal_rate(&self, hours: f64) -> SimResult<f64> {
        ensure_non_negative(hours, "hours", OPERATION)?;
        let index = match self.mode() {
            // The next hour starts just past `hours`, so a plan sitting exactly
            // on a boundary already pays the next bracket's rate.
            PricingMode::Graduated => self
                .tiers()
                .iter()
                .position(|t| hours < t.upper_bound())
                .unwrap_or(self.tiers().len() - 1),
            PricingMode::Volume => self.tier_index_for(hours),
        };
        Ok(self.tiers()[index].rate_per_hour)
    }

    pub fn quote(&self, hours: f64) -> SimResult<PricingQuote> {
        let cost = self.cost(hours)?;
        let tier_index = self.tier_index_for(hours);
        let effective_rate = if hours > 0.0 {
            cost / hours
        } else {
            self.tiers()[0].rate_per_hour
        };

        Ok(PricingQuote {
            hours: qtty::Hours::new(hours),
            cost,
            effective_rate,
            marginal_rate: self.marginal_rate(hours)?,
            tier_index,
            tier_label: self.tier_label(tier_index),
            mode: self.mode(),
        })
    }
}

fn graduated_cost(tiers: &[PricingTier], hours: f64) -> f64 {
    let mut cost = 0.0;
    let mut lower = 0.0;
    for tier in tiers {
        if hours <= lower {
            break;
        }
        let upper = tier.upper_bound().min(hours);
        cost += (upper - lower) * tier.rate_per_hour;
        lower = tier.upper_bound();
    }
    cost
}

/// Build the pricing dataset: quote, cost curve over `[0, max_hours]`, tier
/// limit lines and the current plan marker.
pub fn compute_pricing_data(
    schedule: &PricingSchedule,
    hours: f64,
    max_hours: f64,
    points: usize,
) -> SimResult<PricingData> {
    ensure_non_negative(max_hours, "max_hours", OPERATION)?;
    ensure_points(points, OPERATION)?;

    let quote = schedule.quote(hours)?;
    let cost_curve = ChartSeries::from_fn(
        "Pricing Function",
        linspace(0.0, max_hours, points),
        |h| schedule.cost(h),
    )?;

    let tier_boundaries = schedule
        .boundaries()
        .into_iter()
        .enumerate()
        .map(|(i, b)| ReferenceLine::vertical(format!("Tier {} Limit", i + 1), b))
        .collect();

    let current = ChartMarker::new("Current Plan", hours, quote.cost);

    debug!(
        "Pricing: {} h -> ${:.2} ({}, {} mode)",
        hours, quote.cost, quote.tier_label, quote.mode
    );

    Ok(PricingData {
        quote,
        tiers: schedule.tiers().to_vec(),
        cost_curve,
        tier_boundaries,
        current,
    })
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
